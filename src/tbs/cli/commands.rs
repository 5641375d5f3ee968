use super::print::{print_error, print_result};
use super::setup::{
    print_grouped_help, AccountCommands, AccountFields, BillingCommands, Cli, Commands,
    FileCommands, FilterArgs, HostCommands, HostFields, InvoiceCommands, ListArgs, PlanCommands,
    PlanFields, ProjectCommands, ProjectFields, SelectArgs, ServerCommands, ServerFields,
    SubscriptionCommands, TriggerCommands, UserSelectArgs,
};
use clap::Parser;
use tbs::api::servers::ServerAction;
use tbs::api::{ApiClient, Selector};
use tbs::commands::accounts::{AccountArgs, UserSelector};
use tbs::commands::hosts::HostArgs;
use tbs::commands::projects::ProjectArgs;
use tbs::commands::servers::ServerArgs;
use tbs::commands::triggers::{ActionArgs, SlackArgs, TriggerArgs};
use tbs::commands::{self, CmdResult};
use tbs::config::{Overrides, Settings};
use tbs::error::{Result, TbsError};
use tbs::filters::{FilterSet, ListOptions};
use tbs::models::{ServerConfig, UserProfile};
use tbs::transport::http::HttpTransport;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

struct AppContext {
    api: ApiClient<HttpTransport>,
    settings: Settings,
}

impl AppContext {
    fn emit(&self, group: &str, format: Option<&str>, result: Result<CmdResult>) -> Result<()> {
        let format = self.settings.format_for(group, format);
        let result = result?;
        print_result(&result, &format)?;
        match result.failures() {
            0 => Ok(()),
            failed => Err(TbsError::Incomplete { failed }),
        }
    }

    fn list_options(&self, list: ListArgs, filter: Option<FilterArgs>) -> Result<ListOptions> {
        let filters = match filter {
            Some(f) => FilterSet::from_values(&f.filters)?,
            None => FilterSet::new(),
        };
        Ok(ListOptions {
            limit: list.limit.or(self.settings.limit),
            offset: list.offset,
            ordering: list.order,
            filters,
        })
    }
}

pub fn run() -> Result<()> {
    let Cli {
        command,
        config,
        namespace,
        project,
        root,
        token,
        verbose,
    } = Cli::parse();

    init_tracing(verbose);

    let Some(command) = command else {
        print_grouped_help();
        return Ok(());
    };

    if let Commands::Env = command {
        println!(
            "{}",
            commands::auth::env_script(namespace.as_deref(), project.as_deref())
        );
        return Ok(());
    }

    let overrides = Overrides {
        config,
        root,
        namespace,
        project,
        token,
    };
    let ctx = init_context(&overrides)?;
    dispatch(&ctx, command)
}

/// Prints a fatal error to stderr.
pub fn report(err: &tbs::error::TbsError) {
    print_error(&err.to_string());
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    });

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn init_context(overrides: &Overrides) -> Result<AppContext> {
    let settings = Settings::resolve(overrides)?;
    tracing::debug!(
        root = %settings.root,
        namespace = %settings.namespace,
        config = %settings.config_path.display(),
        "settings resolved"
    );
    let transport = HttpTransport::new(settings.root.clone(), settings.token.clone());
    let api = ApiClient::new(transport, settings.client_context());
    Ok(AppContext { api, settings })
}

fn dispatch(ctx: &AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::Login { username, password } => {
            let result = commands::auth::login(
                &ctx.api,
                &username,
                &password,
                &ctx.settings.token_path(),
            )?;
            print_result(&result, "json")
        }
        Commands::Env => Ok(()),
        Commands::Project { command, output } => {
            let result = handle_project(ctx, command);
            ctx.emit("project", output.format.as_deref(), result)
        }
        Commands::Server { command, output } => {
            let result = handle_server(ctx, command);
            ctx.emit("server", output.format.as_deref(), result)
        }
        Commands::File { command, output } => {
            let result = handle_file(ctx, command);
            ctx.emit("file", output.format.as_deref(), result)
        }
        Commands::Host { command, output } => {
            let result = handle_host(ctx, command);
            ctx.emit("host", output.format.as_deref(), result)
        }
        Commands::Trigger { command, output } => {
            let result = handle_trigger(ctx, command);
            ctx.emit("trigger", output.format.as_deref(), result)
        }
        Commands::Account { command, output } => {
            let result = handle_account(ctx, command);
            ctx.emit("user", output.format.as_deref(), result)
        }
        Commands::Plan { command, output } => {
            let result = handle_plan(ctx, command);
            ctx.emit("plan", output.format.as_deref(), result)
        }
        Commands::Subscription { command, output } => {
            let api = &ctx.api;
            let result = match command {
                SubscriptionCommands::Ls { list } => {
                    commands::billing::list_subscriptions(api, &ctx.list_options(list, None)?)
                }
                SubscriptionCommands::Create { plan } => {
                    commands::billing::create_subscription(api, plan)
                }
                SubscriptionCommands::Describe { id } => {
                    commands::billing::describe_subscription(api, id.uuid)
                }
                SubscriptionCommands::Cancel { id } => {
                    commands::billing::cancel_subscription(api, id.uuid)
                }
            };
            ctx.emit("subscription", output.format.as_deref(), result)
        }
        Commands::Invoice { command, output } => {
            let api = &ctx.api;
            let result = match command {
                InvoiceCommands::Ls { list } => {
                    commands::billing::list_invoices(api, &ctx.list_options(list, None)?)
                }
                InvoiceCommands::Describe { id } => commands::billing::describe_invoice(api, id.uuid),
            };
            ctx.emit("invoice", output.format.as_deref(), result)
        }
        Commands::Billing { command, output } => {
            let api = &ctx.api;
            let result = match command {
                BillingCommands::Ls { list } => {
                    commands::billing::list_cards(api, &ctx.list_options(list, None)?)
                }
                BillingCommands::Describe { id } => commands::billing::describe_card(api, id.uuid),
                BillingCommands::Delete { id } => commands::billing::delete_card(api, id.uuid),
            };
            ctx.emit("billing", output.format.as_deref(), result)
        }
    }
}

fn selector(select: SelectArgs, kind: &str) -> Result<Selector> {
    Selector::from_flags(select.uuid, select.name, kind)
}

fn project_args(name: Option<String>, fields: ProjectFields) -> ProjectArgs {
    ProjectArgs {
        name,
        description: fields.description,
        private: fields.privacy,
        members: fields.members,
    }
}

fn handle_project(ctx: &AppContext, command: ProjectCommands) -> Result<CmdResult> {
    let api = &ctx.api;
    match command {
        ProjectCommands::Ls { list, filter } => {
            commands::projects::list(api, &ctx.list_options(list, Some(filter))?)
        }
        ProjectCommands::Create { name, fields } => {
            commands::projects::create(api, &project_args(name, fields))
        }
        ProjectCommands::Update { select, fields } => {
            commands::projects::update(api, select.uuid, &project_args(select.name, fields))
        }
        ProjectCommands::Delete { select } => {
            commands::projects::delete(api, &selector(select, "project")?)
        }
        ProjectCommands::Adduser { email } => {
            commands::projects::add_user(api, ctx.settings.project.as_deref(), &email)
        }
    }
}

fn server_args(name: Option<String>, fields: ServerFields) -> ServerArgs {
    ServerArgs {
        name,
        image: fields.image,
        resources: fields.resources,
        startup_script: fields.startup_script,
        config: ServerConfig {
            script: fields.script.unwrap_or_default(),
            function: fields.function.unwrap_or_default(),
            command: fields.command.unwrap_or_default(),
            kind: fields.kind.unwrap_or_default(),
        },
    }
}

fn handle_server(ctx: &AppContext, command: ServerCommands) -> Result<CmdResult> {
    let api = &ctx.api;
    let action = |select: SelectArgs, action: ServerAction| {
        commands::servers::run_action(api, &selector(select, "server")?, action)
    };
    match command {
        ServerCommands::Ls { list, filter } => {
            commands::servers::list(api, &ctx.list_options(list, Some(filter))?)
        }
        ServerCommands::Create { name, fields } => {
            commands::servers::create(api, &server_args(name, fields))
        }
        ServerCommands::Describe { select } => {
            commands::servers::describe(api, &selector(select, "server")?)
        }
        ServerCommands::Update { select, fields } => {
            commands::servers::update(api, select.uuid, &server_args(select.name, fields))
        }
        ServerCommands::Start { select } => action(select, ServerAction::Start),
        ServerCommands::Stop { select } => action(select, ServerAction::Stop),
        ServerCommands::Terminate { select } => action(select, ServerAction::Terminate),
    }
}

fn handle_file(ctx: &AppContext, command: FileCommands) -> Result<CmdResult> {
    let api = &ctx.api;
    match command {
        FileCommands::Ls { list, filter } => {
            commands::files::list(api, &ctx.list_options(list, Some(filter))?)
        }
        FileCommands::Create { name, content } => commands::files::create(api, &name, &content),
        FileCommands::Delete { targets } => commands::files::delete(api, targets.as_slice()),
    }
}

fn host_args(name: Option<String>, fields: HostFields) -> HostArgs {
    HostArgs {
        name,
        ip: fields.ip,
        port: fields.port,
    }
}

fn handle_host(ctx: &AppContext, command: HostCommands) -> Result<CmdResult> {
    let api = &ctx.api;
    match command {
        HostCommands::Ls { list, filter } => {
            commands::hosts::list(api, &ctx.list_options(list, Some(filter))?)
        }
        HostCommands::Create { name, fields } => {
            commands::hosts::create(api, &host_args(name, fields))
        }
        HostCommands::Update { select, fields } => {
            commands::hosts::update(api, select.uuid, &host_args(select.name, fields))
        }
        HostCommands::Delete { select } => {
            commands::hosts::delete(api, &selector(select, "host")?)
        }
    }
}

fn handle_trigger(ctx: &AppContext, command: TriggerCommands) -> Result<CmdResult> {
    let api = &ctx.api;
    match command {
        TriggerCommands::Create {
            cause_action,
            cause_method,
            cause_model,
            cause_object,
            cause_payload,
            effect_action,
            effect_method,
            effect_model,
            effect_object,
            effect_payload,
            webhook_url,
            webhook_config,
            schedule,
        } => {
            let args = TriggerArgs {
                cause: ActionArgs {
                    action: cause_action,
                    method: cause_method,
                    model: cause_model,
                    object: cause_object,
                    payload: cause_payload,
                },
                effect: ActionArgs {
                    action: effect_action,
                    method: effect_method,
                    model: effect_model,
                    object: effect_object,
                    payload: effect_payload,
                },
                webhook_url,
                webhook_config,
                schedule,
            };
            commands::triggers::create(api, &args)
        }
        TriggerCommands::Slack {
            webhook,
            text,
            channel,
            action,
            method,
            model,
            object,
        } => {
            let args = SlackArgs {
                webhook,
                text,
                channel,
                cause: ActionArgs {
                    action,
                    method,
                    model,
                    object,
                    payload: None,
                },
            };
            commands::triggers::slack(api, &args)
        }
        TriggerCommands::Describe {
            select,
            server,
            server_uuid,
        } => {
            let server = match (server_uuid, server) {
                (None, None) => None,
                (uuid, name) => Some(Selector::from_flags(uuid, name, "server")?),
            };
            commands::triggers::describe(api, server.as_ref(), &selector(select, "trigger")?)
        }
    }
}

fn account_args(fields: AccountFields) -> AccountArgs {
    AccountArgs {
        username: fields.username,
        password: fields.password,
        email: fields.email,
        first_name: fields.first_name,
        last_name: fields.last_name,
        profile: UserProfile {
            url: fields.url,
            avatar_url: fields.avatar_url,
            bio: fields.bio,
            location: fields.location,
            company: fields.company,
            timezone: fields.timezone,
        },
    }
}

fn user_selector(select: UserSelectArgs) -> Result<UserSelector> {
    UserSelector::from_flags(select.uuid, select.username, select.email)
}

fn handle_account(ctx: &AppContext, command: AccountCommands) -> Result<CmdResult> {
    let api = &ctx.api;
    match command {
        AccountCommands::Create { fields } => {
            commands::accounts::create(api, &account_args(fields))
        }
        AccountCommands::Describe { select } => {
            commands::accounts::describe(api, &user_selector(select)?)
        }
        AccountCommands::Update { id, fields } => {
            commands::accounts::update(api, id.uuid, &account_args(fields))
        }
        AccountCommands::Delete { select } => {
            commands::accounts::delete(api, &user_selector(select)?)
        }
    }
}

fn plan_args(fields: PlanFields) -> commands::billing::PlanArgs {
    commands::billing::PlanArgs {
        name: fields.name,
        statement_descriptor: fields.statement_descriptor,
        trial_period_days: fields.trial_period,
        ..Default::default()
    }
}

fn handle_plan(ctx: &AppContext, command: PlanCommands) -> Result<CmdResult> {
    let api = &ctx.api;
    match command {
        PlanCommands::Ls { list } => {
            commands::billing::list_plans(api, &ctx.list_options(list, None)?)
        }
        PlanCommands::Create {
            amount,
            interval,
            interval_count,
            currency,
            fields,
        } => {
            let args = commands::billing::PlanArgs {
                amount,
                interval: Some(interval),
                interval_count,
                currency: Some(currency),
                ..plan_args(fields)
            };
            commands::billing::create_plan(api, &args)
        }
        PlanCommands::Update { id, fields } => {
            commands::billing::update_plan(api, id.uuid, &plan_args(fields))
        }
        PlanCommands::Describe { id } => commands::billing::describe_plan(api, id.uuid),
        PlanCommands::Delete { id } => commands::billing::delete_plan(api, id.uuid),
    }
}
