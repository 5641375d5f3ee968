use super::{non_empty, CmdMessage, CmdResult};
use crate::api::{ApiClient, Selector};
use crate::error::{Result, TbsError};
use crate::filters::ListOptions;
use crate::models::DockerHostData;
use crate::transport::Transport;

#[derive(Debug, Clone, Default)]
pub struct HostArgs {
    pub name: Option<String>,
    pub ip: Option<String>,
    pub port: Option<i64>,
}

impl HostArgs {
    fn data(&self) -> DockerHostData {
        DockerHostData {
            name: non_empty(self.name.clone()),
            ip: non_empty(self.ip.clone()),
            port: self.port.filter(|p| *p > 0),
        }
    }
}

fn host_id<T: Transport>(api: &ApiClient<T>, selector: &Selector) -> Result<String> {
    match selector {
        Selector::Id(id) => Ok(id.clone()),
        Selector::Name(name) => api.host_id_by_name(name),
    }
}

pub fn list<T: Transport>(api: &ApiClient<T>, options: &ListOptions) -> Result<CmdResult> {
    CmdResult::payload(&api.list_hosts(options)?)
}

pub fn create<T: Transport>(api: &ApiClient<T>, args: &HostArgs) -> Result<CmdResult> {
    let data = args.data();
    if data.name.is_none() || data.ip.is_none() {
        return Err(TbsError::validation("You must provide host --name and --ip"));
    }
    CmdResult::payload(&api.create_host(&data)?)
}

pub fn update<T: Transport>(
    api: &ApiClient<T>,
    uuid: Option<String>,
    args: &HostArgs,
) -> Result<CmdResult> {
    let selector = Selector::from_flags(uuid, args.name.clone(), "host")?;
    let id = host_id(api, &selector)?;
    CmdResult::payload(&api.update_host(&id, &args.data())?)
}

pub fn delete<T: Transport>(api: &ApiClient<T>, selector: &Selector) -> Result<CmdResult> {
    let id = host_id(api, selector)?;
    api.delete_host(&id)?;
    Ok(CmdResult::new().with_message(CmdMessage::success("Host deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ClientContext;
    use crate::transport::memory::MemoryTransport;
    use crate::transport::Method;
    use serde_json::json;

    fn client(transport: MemoryTransport) -> ApiClient<MemoryTransport> {
        ApiClient::new(transport, ClientContext::new("acme"))
    }

    #[test]
    fn delete_by_name() {
        let transport = MemoryTransport::new()
            .on_query(
                Method::Get,
                "/acme/hosts/",
                &[("name", "gpu")],
                json!([{"id": "h1", "name": "gpu"}]),
            )
            .on(Method::Delete, "/acme/hosts/h1/", json!(null));
        let api = client(transport);
        let result = delete(&api, &Selector::Name("gpu".into())).unwrap();
        assert_eq!(result.messages[0].content, "Host deleted");
    }

    #[test]
    fn create_requires_name_and_ip() {
        let api = client(MemoryTransport::new());
        let args = HostArgs {
            name: Some("gpu".into()),
            ..Default::default()
        };
        assert!(matches!(create(&api, &args), Err(TbsError::Validation(_))));
    }

    #[test]
    fn update_sends_port_when_positive() {
        let transport = MemoryTransport::new().on(
            Method::Put,
            "/acme/hosts/h1/",
            json!({"id": "h1", "name": "gpu", "port": 2376}),
        );
        let api = client(transport);
        let args = HostArgs {
            port: Some(2376),
            ..Default::default()
        };
        update(&api, Some("h1".into()), &args).unwrap();
        assert_eq!(
            api.transport().last().unwrap().body,
            Some(json!({"port": 2376}))
        );
    }
}
