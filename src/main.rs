use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use forms::config::{ConfigError, check_url};
use forms::form::Collaborators;
use forms::net::api::{FetchError, ResourceApi};
use forms::net::http::ReqwestHttpClient;
use forms::net::identity::HttpIdentityProvider;
use forms::net::{RecordingNavigator, RequestError};
use forms::{Field, FormSnapshot, FormWorkflow, FormsConfig, Mode, SocialOutcome, SocialProvider, SubmitOutcome};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("http client setup failed: {0}")]
    Client(#[from] RequestError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("form was not submitted: {0}")]
    NotSubmitted(String),
    #[error("form submission failed: {0}")]
    Rejected(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "showcase", about = "Drive the login, signup and register forms from a terminal")]
struct Cli {
    #[arg(long, env = "FORMS_CALLBACK_URL")]
    callback_url: Option<String>,

    #[arg(long, env = "FORMS_AUTH_BASE_URL")]
    auth_base_url: Option<String>,

    #[arg(long, env = "FORMS_API_BASE_URL")]
    api_base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit the sign-in form with email/password.
    Login(LoginArgs),
    /// Submit the signup form against the credentials endpoint.
    Signup(AccountArgs),
    /// Submit the register form and show the created record.
    Register(RegisterArgs),
    /// Press a social provider button on the sign-in form.
    Social {
        #[arg(value_parser = clap::value_parser!(SocialProvider))]
        provider: SocialProvider,
    },
    /// Read users, posts or photos from the mock REST API.
    Fetch(FetchCommand),
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    password: String,
}

#[derive(Args, Debug)]
struct AccountArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    password: String,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[command(flatten)]
    account: AccountArgs,

    #[arg(long, default_value_t = false, help = "Print the registered password in clear text")]
    reveal_password: bool,
}

#[derive(Args, Debug)]
struct FetchCommand {
    #[command(subcommand)]
    command: FetchSubcommand,
}

#[derive(Subcommand, Debug)]
enum FetchSubcommand {
    Users,
    User { id: u64 },
    Posts,
    Photos,
}

/// What gets printed after driving a form.
#[derive(Debug, Serialize)]
struct FormReport {
    outcome: String,
    submit_label: &'static str,
    form: FormSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    registered_password: Option<String>,
    navigated: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = FormsConfig::from_env()?;
    if let Some(url) = cli.callback_url {
        config.callback_url = check_url("--callback-url", &url)?;
    }
    if let Some(url) = cli.auth_base_url {
        config.auth_base_url = check_url("--auth-base-url", &url)?.trim_end_matches('/').to_owned();
    }
    if let Some(url) = cli.api_base_url {
        config.api_base_url = check_url("--api-base-url", &url)?.trim_end_matches('/').to_owned();
    }

    match cli.command {
        Command::Login(args) => {
            let fields = [(Field::Email, args.email), (Field::Password, args.password)];
            run_submit(&config, Mode::Login, fields.into(), false).await
        }
        Command::Signup(args) => run_submit(&config, Mode::Signup, account_fields(args), false).await,
        Command::Register(args) => {
            run_submit(&config, Mode::Register, account_fields(args.account), args.reveal_password).await
        }
        Command::Social { provider } => run_social(&config, provider).await,
        Command::Fetch(fetch) => run_fetch(&config, fetch).await,
    }
}

fn account_fields(args: AccountArgs) -> Vec<(Field, String)> {
    vec![(Field::Name, args.name), (Field::Email, args.email), (Field::Password, args.password)]
}

fn build_workflow(config: &FormsConfig, mode: Mode) -> Result<(FormWorkflow, Arc<RecordingNavigator>), CliError> {
    let navigator = Arc::new(RecordingNavigator::new());
    let collaborators = Collaborators {
        identity: Arc::new(HttpIdentityProvider::new(&config.auth_base_url, config.timeouts)?),
        http: Arc::new(ReqwestHttpClient::new(config.timeouts)?),
        navigator: navigator.clone(),
    };
    let workflow = FormWorkflow::new(mode, config, collaborators).with_on_success(Arc::new(move || {
        tracing::info!(%mode, "completion callback");
    }));
    Ok((workflow, navigator))
}

async fn run_submit(
    config: &FormsConfig,
    mode: Mode,
    fields: Vec<(Field, String)>,
    reveal_password: bool,
) -> Result<(), CliError> {
    let (workflow, navigator) = build_workflow(config, mode)?;
    for (field, value) in fields {
        workflow.set_field(field, value);
    }

    let outcome = workflow.submit().await;
    if reveal_password {
        workflow.toggle_registered_password_visibility();
    }

    let form = workflow.snapshot();
    let report = FormReport {
        outcome: describe_submit(&outcome),
        submit_label: mode.submit_label(),
        registered_password: form.registered_password_display(),
        form,
        navigated: navigator.visited(),
    };
    print_json(&report)?;

    match outcome {
        SubmitOutcome::Succeeded(_) => Ok(()),
        SubmitOutcome::Failed(message) => Err(CliError::Rejected(message)),
        other => Err(CliError::NotSubmitted(describe_submit(&other))),
    }
}

async fn run_social(config: &FormsConfig, provider: SocialProvider) -> Result<(), CliError> {
    let (workflow, navigator) = build_workflow(config, Mode::Login)?;
    let outcome = workflow.social_sign_in(provider).await;
    let report = FormReport {
        outcome: describe_social(provider, &outcome),
        submit_label: Mode::Login.submit_label(),
        registered_password: None,
        form: workflow.snapshot(),
        navigated: navigator.visited(),
    };
    print_json(&report)
}

async fn run_fetch(config: &FormsConfig, fetch: FetchCommand) -> Result<(), CliError> {
    let api = ResourceApi::new(Arc::new(ReqwestHttpClient::new(config.timeouts)?), &config.api_base_url);
    match fetch.command {
        FetchSubcommand::Users => print_json(&api.fetch_users().await?),
        FetchSubcommand::User { id } => print_json(&api.fetch_user(id).await?),
        FetchSubcommand::Posts => print_json(&api.fetch_posts().await?),
        FetchSubcommand::Photos => print_json(&api.fetch_photos().await?),
    }
}

fn describe_submit(outcome: &SubmitOutcome) -> String {
    match outcome {
        SubmitOutcome::Busy(token) => format!("busy ({token})"),
        SubmitOutcome::Locked => "locked: reset the form first".to_owned(),
        SubmitOutcome::Invalid(errors) => {
            let fields: Vec<String> = errors.iter().map(|(field, message)| format!("{field}: {message}")).collect();
            format!("invalid: {}", fields.join("; "))
        }
        SubmitOutcome::Succeeded(_) => "submitted".to_owned(),
        SubmitOutcome::Failed(message) => format!("failed: {message}"),
    }
}

fn describe_social(provider: SocialProvider, outcome: &SocialOutcome) -> String {
    match outcome {
        SocialOutcome::Busy(token) => format!("busy ({token})"),
        SocialOutcome::Unavailable => "unavailable on this form".to_owned(),
        SocialOutcome::Redirected(Some(url)) => format!("continue {} sign-in at {url}", provider.label()),
        SocialOutcome::Redirected(None) => format!("{} sign-in started", provider.label()),
        SocialOutcome::Swallowed => format!("{} sign-in failed; see logs", provider.label()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
