use clap::Parser;
use color_eyre::Result;
use taskdue::{ApiClient, Config, Profile, cli::{Cli, Commands}};

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    // Load configuration: an explicit --config path wins over the profile's
    // default location
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load_with_profile(profile)?,
    };

    // The --server flag overrides the configured URL for this run only
    let server_url = cli.server.as_deref().unwrap_or(&config.server_url);
    let client = ApiClient::new(server_url, config.request_timeout_secs)?;

    // Dispatch to appropriate command handler
    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let app = taskdue::tui::App::new(config, client);
            taskdue::tui::run_event_loop(app)?;
        }
        Commands::Register { username, password } => {
            taskdue::cli::handle_register(username, password, &client)?;
        }
        Commands::Login { username, password } => {
            taskdue::cli::handle_login(username, password, &client)?;
        }
        Commands::AddTask {
            description,
            start,
            deadline,
            token,
        } => {
            taskdue::cli::handle_add_task(description, start, deadline, &token, &client)?;
        }
        Commands::ListTasks { token } => {
            taskdue::cli::handle_list_tasks(&token, &client)?;
        }
    }

    Ok(())
}
