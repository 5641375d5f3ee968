use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tbs::commands::triggers::parse_json_value;

#[derive(Parser, Debug)]
#[command(name = "tbs", bin_name = "tbs", version)]
#[command(about = "3Blades CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default is $HOME/.threeblades.yaml)
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// 3Blades namespace
    #[arg(long, global = true, env = "THREEBLADES_NAMESPACE", help_heading = "Options")]
    pub namespace: Option<String>,

    /// Project name
    #[arg(long, global = true, env = "THREEBLADES_PROJECT", help_heading = "Options")]
    pub project: Option<String>,

    /// API root URL
    #[arg(long, global = true, env = "THREEBLADES_ROOT", help_heading = "Options")]
    pub root: Option<String>,

    /// API token (overrides the saved login)
    #[arg(long, global = true, env = "THREEBLADES_TOKEN", hide = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Session,
    Workspace,
    Account,
    Billing,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Session => "Session Commands:",
            CommandGroup::Workspace => "Workspace Commands:",
            CommandGroup::Account => "Account Commands:",
            CommandGroup::Billing => "Billing Commands:",
        }
    }

    /// Returns the group for a given command name
    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "login" | "env" => Some(CommandGroup::Session),
            "project" | "server" | "file" | "host" | "trigger" => Some(CommandGroup::Workspace),
            "account" => Some(CommandGroup::Account),
            "plan" | "subscription" | "invoice" | "billing" => Some(CommandGroup::Billing),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[
            CommandGroup::Session,
            CommandGroup::Workspace,
            CommandGroup::Account,
            CommandGroup::Billing,
        ]
    }
}

/// Returns the custom grouped help output as a string
pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("tbs {version}\n"));
    output.push_str("3Blades CLI\n");
    output.push('\n');
    output.push_str("Usage: tbs [OPTIONS] <COMMAND>\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();
    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<14} {}\n", sc.get_name(), about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("      --config <PATH>      Config file (default is $HOME/.threeblades.yaml)\n");
    output.push_str("      --namespace <NS>     3Blades namespace [env: THREEBLADES_NAMESPACE]\n");
    output.push_str("      --project <NAME>     Project name [env: THREEBLADES_PROJECT]\n");
    output.push_str("      --root <URL>         API root URL [env: THREEBLADES_ROOT]\n");
    output.push_str("  -v, --verbose            Verbose output (-v info, -vv debug)\n");
    output.push_str("  -h, --help               Print help\n");
    output.push_str("  -V, --version            Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// `-f/--format`, shared by every group that renders a payload.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format: "json" or a row template such as "{{.name}}\t{{.id}}"
    #[arg(short, long, global = true)]
    pub format: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Maximum number of results
    #[arg(long)]
    pub limit: Option<u32>,

    /// Number of results to skip
    #[arg(long)]
    pub offset: Option<u32>,

    /// Field to order by (prefix with - for descending)
    #[arg(long)]
    pub order: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Filter results (ex. --filter name=test,private=true); repeatable
    #[arg(long = "filter", value_name = "KEY=VALUE")]
    pub filters: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SelectArgs {
    /// ID of the target
    #[arg(long)]
    pub uuid: Option<String>,

    /// Name of the target
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct UuidArg {
    /// ID of the target
    #[arg(long)]
    pub uuid: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Login to 3Blades
    #[command(display_order = 1)]
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },

    /// Print shell exports for --namespace and --project
    #[command(display_order = 2)]
    Env,

    /// Handle projects
    #[command(display_order = 10)]
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// User server management
    #[command(display_order = 11)]
    Server {
        #[command(subcommand)]
        command: ServerCommands,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// File management
    #[command(display_order = 12)]
    File {
        #[command(subcommand)]
        command: FileCommands,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Docker host management
    #[command(display_order = 13)]
    Host {
        #[command(subcommand)]
        command: HostCommands,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Handle triggers
    #[command(display_order = 14)]
    Trigger {
        #[command(subcommand)]
        command: TriggerCommands,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Account management
    #[command(display_order = 20)]
    Account {
        #[command(subcommand)]
        command: AccountCommands,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Billing plans
    #[command(display_order = 30)]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Billing subscriptions
    #[command(display_order = 31)]
    Subscription {
        #[command(subcommand)]
        command: SubscriptionCommands,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Invoices
    #[command(display_order = 32)]
    Invoice {
        #[command(subcommand)]
        command: InvoiceCommands,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Payment methods
    #[command(display_order = 33)]
    Billing {
        #[command(subcommand)]
        command: BillingCommands,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ProjectFields {
    /// Project description
    #[arg(long)]
    pub description: Option<String>,

    /// Should this project be private?
    #[arg(long)]
    pub privacy: bool,

    /// Project members (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub members: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List projects
    Ls {
        #[command(flatten)]
        list: ListArgs,
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Create project
    Create {
        /// Project name
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: ProjectFields,
    },

    /// Update project
    Update {
        #[command(flatten)]
        select: SelectArgs,
        #[command(flatten)]
        fields: ProjectFields,
    },

    /// Delete project
    Delete {
        #[command(flatten)]
        select: SelectArgs,
    },

    /// Add collaborator to project
    Adduser {
        /// Email of the user to add
        email: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ServerFields {
    /// Server image
    #[arg(long)]
    pub image: Option<String>,

    /// Server resources
    #[arg(long)]
    pub resources: Option<String>,

    /// Server startup script
    #[arg(long)]
    pub startup_script: Option<String>,

    /// Function to run
    #[arg(long)]
    pub function: Option<String>,

    /// Script to run
    #[arg(long)]
    pub script: Option<String>,

    /// Command to run
    #[arg(long)]
    pub command: Option<String>,

    /// Server type [restful,cron,jupyter]
    #[arg(long = "type")]
    pub kind: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ServerCommands {
    /// List servers
    Ls {
        #[command(flatten)]
        list: ListArgs,
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Create server
    Create {
        /// Server name
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: ServerFields,
    },

    /// Server details
    Describe {
        #[command(flatten)]
        select: SelectArgs,
    },

    /// Update server
    Update {
        #[command(flatten)]
        select: SelectArgs,
        #[command(flatten)]
        fields: ServerFields,
    },

    /// Start server
    Start {
        #[command(flatten)]
        select: SelectArgs,
    },

    /// Stop server
    Stop {
        #[command(flatten)]
        select: SelectArgs,
    },

    /// Terminate server
    Terminate {
        #[command(flatten)]
        select: SelectArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum FileCommands {
    /// List files
    Ls {
        #[command(flatten)]
        list: ListArgs,
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Create a file from base64 content
    #[command(alias = "upload")]
    Create {
        /// The file's name
        #[arg(long)]
        name: String,

        /// Content as base64 encoded string
        #[arg(long)]
        content: String,
    },

    /// Delete files
    #[command(alias = "rm")]
    Delete {
        /// File names or ids
        #[arg(required = true, num_args = 1..)]
        targets: Vec<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct HostFields {
    /// Host ip
    #[arg(long)]
    pub ip: Option<String>,

    /// Host port
    #[arg(long)]
    pub port: Option<i64>,
}

#[derive(Subcommand, Debug)]
pub enum HostCommands {
    /// List hosts
    Ls {
        #[command(flatten)]
        list: ListArgs,
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Create host
    Create {
        /// Host name
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: HostFields,
    },

    /// Update host
    Update {
        #[command(flatten)]
        select: SelectArgs,
        #[command(flatten)]
        fields: HostFields,
    },

    /// Delete host
    Delete {
        #[command(flatten)]
        select: SelectArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct AccountFields {
    /// Account username
    #[arg(long)]
    pub username: Option<String>,

    /// Account password
    #[arg(long)]
    pub password: Option<String>,

    /// Account email
    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub url: Option<String>,

    #[arg(long)]
    pub avatar_url: Option<String>,

    #[arg(long)]
    pub bio: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub timezone: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct UserSelectArgs {
    /// User id
    #[arg(long)]
    pub uuid: Option<String>,

    /// Username
    #[arg(long)]
    pub username: Option<String>,

    /// User email
    #[arg(long)]
    pub email: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    /// Create account
    Create {
        #[command(flatten)]
        fields: AccountFields,
    },

    /// Get information for existing account
    Describe {
        #[command(flatten)]
        select: UserSelectArgs,
    },

    /// Update account
    Update {
        #[command(flatten)]
        id: UuidArg,
        #[command(flatten)]
        fields: AccountFields,
    },

    /// Delete user
    Delete {
        #[command(flatten)]
        select: UserSelectArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum TriggerCommands {
    /// Create trigger
    Create {
        #[arg(long)]
        cause_action: Option<String>,
        #[arg(long)]
        cause_method: Option<String>,
        #[arg(long)]
        cause_model: Option<String>,
        #[arg(long)]
        cause_object: Option<String>,
        /// Cause payload (JSON)
        #[arg(long, value_parser = parse_json_value)]
        cause_payload: Option<serde_json::Value>,

        #[arg(long)]
        effect_action: Option<String>,
        #[arg(long)]
        effect_method: Option<String>,
        #[arg(long)]
        effect_model: Option<String>,
        #[arg(long)]
        effect_object: Option<String>,
        /// Effect payload (JSON)
        #[arg(long, value_parser = parse_json_value)]
        effect_payload: Option<serde_json::Value>,

        /// Webhook url
        #[arg(long)]
        webhook_url: Option<String>,
        /// Webhook config (JSON)
        #[arg(long, value_parser = parse_json_value)]
        webhook_config: Option<serde_json::Value>,

        /// Cron schedule
        #[arg(long)]
        schedule: Option<String>,
    },

    /// Send slack message after an event
    Slack {
        /// Slack webhook url
        #[arg(long)]
        webhook: String,
        /// Text to send
        #[arg(long, default_value = "")]
        text: String,
        /// Channel to send to
        #[arg(long, default_value = "")]
        channel: String,
        /// Cause action
        #[arg(long)]
        action: Option<String>,
        /// Cause method
        #[arg(long)]
        method: Option<String>,
        /// Cause type
        #[arg(long)]
        model: Option<String>,
        /// Cause object
        #[arg(long)]
        object: Option<String>,
    },

    /// Describe a service trigger of a server
    Describe {
        #[command(flatten)]
        select: SelectArgs,
        /// Server name (defaults to the configured server)
        #[arg(long)]
        server: Option<String>,
        /// Server id
        #[arg(long)]
        server_uuid: Option<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct PlanFields {
    /// Name of the plan
    #[arg(long)]
    pub name: Option<String>,

    /// Additional info that will show on customer's credit card statement
    #[arg(long)]
    pub statement_descriptor: Option<String>,

    /// Length of the plan's trial period, in days
    #[arg(long)]
    pub trial_period: Option<i64>,
}

#[derive(Subcommand, Debug)]
pub enum PlanCommands {
    /// List plans
    Ls {
        #[command(flatten)]
        list: ListArgs,
    },

    /// Create plan
    Create {
        /// Amount, in cents, the plan will cost
        #[arg(long)]
        amount: Option<i64>,
        /// day|week|month|year
        #[arg(long, default_value = "month")]
        interval: String,
        /// The number of intervals between each billing
        #[arg(long)]
        interval_count: Option<i64>,
        /// ISO currency code, e.g. usd
        #[arg(long, default_value = "usd")]
        currency: String,
        #[command(flatten)]
        fields: PlanFields,
    },

    /// Update plan
    Update {
        #[command(flatten)]
        id: UuidArg,
        #[command(flatten)]
        fields: PlanFields,
    },

    /// Plan details
    Describe {
        #[command(flatten)]
        id: UuidArg,
    },

    /// Delete plan
    Delete {
        #[command(flatten)]
        id: UuidArg,
    },
}

#[derive(Subcommand, Debug)]
pub enum SubscriptionCommands {
    /// List subscriptions
    Ls {
        #[command(flatten)]
        list: ListArgs,
    },

    /// Subscribe to a plan
    Create {
        /// Plan ID
        #[arg(long)]
        plan: Option<String>,
    },

    /// Subscription details
    Describe {
        #[command(flatten)]
        id: UuidArg,
    },

    /// Cancel subscription
    Cancel {
        #[command(flatten)]
        id: UuidArg,
    },
}

#[derive(Subcommand, Debug)]
pub enum InvoiceCommands {
    /// List invoices
    Ls {
        #[command(flatten)]
        list: ListArgs,
    },

    /// Invoice details
    Describe {
        #[command(flatten)]
        id: UuidArg,
    },
}

#[derive(Subcommand, Debug)]
pub enum BillingCommands {
    /// List cards
    Ls {
        #[command(flatten)]
        list: ListArgs,
    },

    /// Card details
    Describe {
        #[command(flatten)]
        id: UuidArg,
    },

    /// Delete card
    #[command(alias = "rm")]
    Delete {
        #[command(flatten)]
        id: UuidArg,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_every_command_has_a_group() {
        for sc in Cli::command().get_subcommands() {
            assert!(
                CommandGroup::for_command(sc.get_name()).is_some(),
                "{} has no help group",
                sc.get_name()
            );
        }
    }

    #[test]
    fn test_legacy_command_names() {
        let cli =
            Cli::try_parse_from(["tbs", "file", "upload", "--name", "a.py", "--content", "eA=="])
                .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::File {
                command: FileCommands::Create { .. },
                ..
            })
        ));

        let cli = Cli::try_parse_from(["tbs", "billing", "rm", "--uuid", "c1"]).unwrap();
        match cli.command {
            Some(Commands::Billing {
                command: BillingCommands::Delete { id },
                ..
            }) => assert_eq!(id.uuid.as_deref(), Some("c1")),
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn test_filters_repeat() {
        let cli = Cli::try_parse_from([
            "tbs", "project", "ls", "--filter", "a=1,b=2", "--filter", "b=3",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Project {
                command: ProjectCommands::Ls { filter, .. },
                ..
            }) => assert_eq!(filter.filters, vec!["a=1,b=2", "b=3"]),
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn test_format_after_subcommand() {
        let cli = Cli::try_parse_from(["tbs", "server", "ls", "-f", "{{.name}}"]).unwrap();
        match cli.command {
            Some(Commands::Server { output, .. }) => {
                assert_eq!(output.format.as_deref(), Some("{{.name}}"))
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn test_members_are_comma_separated() {
        let cli = Cli::try_parse_from([
            "tbs", "project", "create", "--name", "demo", "--members", "a@x.io,b@x.io",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Project {
                command: ProjectCommands::Create { fields, .. },
                ..
            }) => assert_eq!(fields.members, vec!["a@x.io", "b@x.io"]),
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_json_payload_is_rejected() {
        let err = Cli::try_parse_from(["tbs", "trigger", "create", "--cause-payload", "{nope"]);
        assert!(err.is_err());
    }

    #[test]
    fn test_grouped_help_lists_groups() {
        let help = get_grouped_help();
        assert!(help.contains("Workspace Commands:"));
        assert!(help.contains("subscription"));
    }
}
