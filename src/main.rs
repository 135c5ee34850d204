//! Sender command line client
//!
//! Main application entry point

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, error};
use uuid::Uuid;

use sender_client::{
    config::Settings,
    eligibility::{TemplateMode, TemplateSelection},
    models::MessengerType,
    services::{BroadcastDraft, ServiceFactory},
    utils::logging,
    ApiClient, FileTokenStore, SenderError, Session,
};

#[derive(Parser, Debug)]
#[command(name = "sender", author, version, about = "Sender messaging-broadcast client")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "SENDER_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and log into it
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long, env = "SENDER_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Subscription plans
    #[command(subcommand)]
    Plans(PlansCommand),
    #[command(flatten)]
    LoggedIn(LoggedInCommand),
}

/// Commands that need a restored session
#[derive(Subcommand, Debug)]
enum LoggedInCommand {
    /// Show the current user and quota
    Whoami,
    /// Messenger accounts
    #[command(subcommand)]
    Accounts(AccountsCommand),
    /// Contacts
    #[command(subcommand)]
    Contacts(ContactsCommand),
    /// Message templates
    #[command(subcommand)]
    Templates(TemplatesCommand),
    /// Broadcast history
    Logs,
    /// Check whether a broadcast can start and print its plan
    Check(CheckArgs),
    /// User administration (admin only)
    #[command(subcommand)]
    Users(UsersCommand),
}

#[derive(Subcommand, Debug)]
enum AccountsCommand {
    List {
        /// Only accounts that can be used for a broadcast
        #[arg(long)]
        active: bool,
    },
    Add {
        #[arg(long = "type")]
        messenger_type: MessengerType,
        #[arg(long)]
        name: String,
    },
}

#[derive(Subcommand, Debug)]
enum ContactsCommand {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        telegram: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum TemplatesCommand {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        content: String,
    },
}

#[derive(Subcommand, Debug)]
enum PlansCommand {
    List,
    /// Change a plan's price (admin only)
    SetPrice { plan: String, price: i64 },
}

#[derive(Subcommand, Debug)]
enum UsersCommand {
    List,
    /// Grant or revoke unlimited sending
    Unlimited {
        user_id: Uuid,
        #[arg(long)]
        revoke: bool,
    },
    /// Move a user to another plan
    Subscription { user_id: Uuid, plan: String },
}

#[derive(Args, Debug)]
struct CheckArgs {
    #[arg(long)]
    account: Option<Uuid>,
    #[arg(long, default_value = "single")]
    mode: TemplateMode,
    /// Template id; repeat for random and alternate modes
    #[arg(long = "template")]
    templates: Vec<Uuid>,
    /// Print the per-recipient plan when the broadcast can start
    #[arg(long)]
    plan: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<SenderError>() {
                Some(err) => {
                    error!(severity = %err.severity(), error = %err, "Command failed");
                    eprintln!("{}", err.user_message());
                }
                None => eprintln!("{:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;
    settings.validate()?;
    let _guard = logging::init_logging(&settings.logging)?;
    debug!("{}", sender_client::info());

    let api = ApiClient::new(&settings.api)?;
    let store = FileTokenStore::new(settings.storage.token_path.clone());
    let mut session = Session::new(api, Box::new(store));

    match cli.command {
        Command::Login { email, password } => {
            let user = session.login(&email, &password).await?;
            println!("Logged in as {} ({})", user.username, user.email);
        }
        Command::Register { email, username, password } => {
            let user = session.register(&email, &username, &password).await?;
            println!("Registered and logged in as {}", user.username);
        }
        Command::Logout => {
            session.logout()?;
            println!("Logged out");
        }
        Command::Plans(PlansCommand::List) => {
            let plans = session.public_api().subscription_plans().await?;
            for (id, plan) in plans {
                let limit = if plan.message_limit < 0 {
                    "unlimited".to_string()
                } else {
                    plan.message_limit.to_string()
                };
                println!("{:<14} {:<20} limit {:<10} price {}", id, plan.name, limit, plan.price);
            }
        }
        Command::Plans(PlansCommand::SetPrice { plan, price }) => {
            let services = logged_in(&mut session).await?;
            let message = services.admin.update_plan_price(&plan, price).await?;
            println!("{}", message.message);
        }
        Command::LoggedIn(command) => {
            let services = logged_in(&mut session).await?;
            run_logged_in(&session, &services, command).await?;
        }
    }

    Ok(())
}

/// Restore the stored session or fail with a hint to log in
async fn logged_in(session: &mut Session) -> anyhow::Result<ServiceFactory> {
    if !session.restore().await? {
        return Err(SenderError::Authentication(
            "You are not logged in. Run `sender login` first.".to_string(),
        )
        .into());
    }
    Ok(ServiceFactory::new(session)?)
}

async fn run_logged_in(
    session: &Session,
    services: &ServiceFactory,
    command: LoggedInCommand,
) -> anyhow::Result<()> {
    match command {
        LoggedInCommand::Whoami => {
            let user = session.require_user()?;
            println!("{} <{}> role={:?}", user.username, user.email, user.role);
            if user.is_unlimited {
                println!("plan {} (unlimited sending)", user.subscription_plan);
            } else {
                println!(
                    "plan {}, {} messages sent this month",
                    user.subscription_plan, user.messages_sent_this_month
                );
            }
        }
        LoggedInCommand::Accounts(AccountsCommand::List { active }) => {
            let accounts = if active {
                services.accounts.list_active().await?
            } else {
                services.accounts.list().await?
            };
            for account in accounts {
                let status = if account.is_active { "active" } else { "inactive" };
                println!("{}  {:<9} {:<8} {}", account.id, account.messenger_type, status, account.account_name);
            }
        }
        LoggedInCommand::Accounts(AccountsCommand::Add { messenger_type, name }) => {
            let account = services.accounts.create(messenger_type, &name).await?;
            println!("Connected {} account {} ({})", account.messenger_type, account.account_name, account.id);
        }
        LoggedInCommand::Contacts(ContactsCommand::List) => {
            for contact in services.contacts.list().await? {
                println!(
                    "{}  {:<24} phone={:<16} telegram={}",
                    contact.id,
                    contact.name,
                    contact.phone.as_deref().unwrap_or("-"),
                    contact.telegram_username.as_deref().unwrap_or("-"),
                );
            }
        }
        LoggedInCommand::Contacts(ContactsCommand::Add { name, phone, telegram }) => {
            let contact = services.contacts.create(&name, phone, telegram).await?;
            println!("Added contact {} ({})", contact.name, contact.id);
        }
        LoggedInCommand::Templates(TemplatesCommand::List) => {
            for template in services.templates.list().await? {
                println!("{}  {:<24} {} chars", template.id, template.name, template.content.chars().count());
            }
        }
        LoggedInCommand::Templates(TemplatesCommand::Add { name, content }) => {
            let template = services.templates.create(&name, &content).await?;
            println!("Created template {} ({})", template.name, template.id);
        }
        LoggedInCommand::Logs => {
            for log in services.broadcast.logs().await? {
                println!(
                    "{}  {:<9} {:?} total={} ok={} failed={} at {}",
                    log.id,
                    log.messenger_type,
                    log.status,
                    log.total_contacts,
                    log.successful_sends,
                    log.failed_sends,
                    log.created_at.format("%Y-%m-%d %H:%M"),
                );
            }
        }
        LoggedInCommand::Check(args) => check(services, args).await?,
        LoggedInCommand::Users(UsersCommand::List) => {
            for user in services.admin.list_users().await? {
                println!(
                    "{}  {:<20} {:<28} plan={:<13} unlimited={} sent={}",
                    user.id,
                    user.username,
                    user.email,
                    user.subscription_plan,
                    user.is_unlimited,
                    user.messages_sent_this_month,
                );
            }
        }
        LoggedInCommand::Users(UsersCommand::Unlimited { user_id, revoke }) => {
            let message = services.admin.set_unlimited(user_id, !revoke).await?;
            println!("{}", message.message);
        }
        LoggedInCommand::Users(UsersCommand::Subscription { user_id, plan }) => {
            let message = services.admin.set_subscription(user_id, &plan).await?;
            println!("{}", message.message);
        }
    }

    Ok(())
}

async fn check(services: &ServiceFactory, args: CheckArgs) -> anyhow::Result<()> {
    let snapshot = services.broadcast.snapshot().await?;

    let selection = TemplateSelection::from_ids(args.mode, args.templates)?;
    let draft = BroadcastDraft::new(args.account, selection);

    let evaluation = draft.evaluate(&snapshot);
    println!("eligible contacts: {}", evaluation.eligible_contacts.len());
    if let Some(remaining) = evaluation.quota.and_then(|q| q.remaining()) {
        println!("quota remaining: {}", remaining);
    }
    if !evaluation.can_start() {
        anyhow::bail!(SenderError::validation(evaluation.reason()));
    }
    println!("{}", evaluation.reason());

    if args.plan {
        let plan = draft.plan(&snapshot, &mut rand::thread_rng())?;
        println!("{}", serde_json::to_string_pretty(&plan)?);
    }
    Ok(())
}
