use super::{non_empty, CmdMessage, CmdResult};
use crate::api::ApiClient;
use crate::error::{Result, TbsError};
use crate::models::{User, UserData, UserProfile};
use crate::transport::Transport;

#[derive(Debug, Clone, Default)]
pub struct AccountArgs {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile: UserProfile,
}

impl AccountArgs {
    fn data(&self) -> UserData {
        UserData {
            username: non_empty(self.username.clone()),
            password: non_empty(self.password.clone()),
            email: non_empty(self.email.clone()),
            first_name: non_empty(self.first_name.clone()),
            last_name: non_empty(self.last_name.clone()),
            profile: UserProfile {
                url: non_empty(self.profile.url.clone()),
                avatar_url: non_empty(self.profile.avatar_url.clone()),
                bio: non_empty(self.profile.bio.clone()),
                location: non_empty(self.profile.location.clone()),
                company: non_empty(self.profile.company.clone()),
                timezone: non_empty(self.profile.timezone.clone()),
            },
        }
    }
}

/// How a user is picked for `describe` and `delete`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserSelector {
    Id(String),
    Username(String),
    Email(String),
}

impl UserSelector {
    /// Username wins over email, email over ID.
    pub fn from_flags(
        uuid: Option<String>,
        username: Option<String>,
        email: Option<String>,
    ) -> Result<Self> {
        if let Some(name) = non_empty(username) {
            Ok(UserSelector::Username(name))
        } else if let Some(email) = non_empty(email) {
            Ok(UserSelector::Email(email))
        } else if let Some(id) = non_empty(uuid) {
            Ok(UserSelector::Id(id))
        } else {
            Err(TbsError::validation(
                "You must specify --uuid, --username or --email",
            ))
        }
    }
}

fn find<T: Transport>(api: &ApiClient<T>, selector: &UserSelector) -> Result<User> {
    match selector {
        UserSelector::Id(id) => api.user_by_id(id),
        UserSelector::Username(name) => api.user_by_username(name),
        UserSelector::Email(email) => api.user_by_email(email),
    }
}

pub fn create<T: Transport>(api: &ApiClient<T>, args: &AccountArgs) -> Result<CmdResult> {
    let data = args.data();
    let missing: Vec<&str> = [
        ("username", data.username.is_none()),
        ("password", data.password.is_none()),
        ("email", data.email.is_none()),
    ]
    .into_iter()
    .filter_map(|(flag, absent)| absent.then_some(flag))
    .collect();
    if !missing.is_empty() {
        return Err(TbsError::validation(format!(
            "You need to provide flags: {}",
            missing.join(", ")
        )));
    }
    CmdResult::payload(&api.create_user(&data)?)
}

pub fn describe<T: Transport>(api: &ApiClient<T>, selector: &UserSelector) -> Result<CmdResult> {
    CmdResult::payload(&find(api, selector)?)
}

pub fn update<T: Transport>(
    api: &ApiClient<T>,
    uuid: Option<String>,
    args: &AccountArgs,
) -> Result<CmdResult> {
    let id = non_empty(uuid)
        .ok_or_else(|| TbsError::validation("You must specify the account --uuid"))?;
    CmdResult::payload(&api.update_user(&id, &args.data())?)
}

pub fn delete<T: Transport>(api: &ApiClient<T>, selector: &UserSelector) -> Result<CmdResult> {
    let user = find(api, selector)?;
    api.delete_user(&user.id)?;
    Ok(CmdResult::new().with_message(CmdMessage::success("User deleted.")))
}
