use std::io::Write as _;
use std::time::Duration;

use clap::Parser;
use dog_discoverer::config::{API_KEY_ENV, TomlConfig};
use dog_discoverer::core::state::AppState;
use dog_discoverer::domain::ports::{ConfigProvider, DogSource};
use dog_discoverer::utils::monitor::SessionMonitor;
use dog_discoverer::utils::{logger, validation::Validate};
use dog_discoverer::{
    CliConfig, DiscoverApp, DiscoverEngine, HistoryExporter, LocalStorage, TheDogApi,
};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Discover,
    Ban(BanTarget),
    Unban(String),
    BanList,
    History,
    Export,
    Help,
    Quit,
}

/// `ban` 的對象：目前顯示的屬性之一，或任意值
#[derive(Debug, Clone, PartialEq)]
enum BanTarget {
    Breed,
    Origin,
    Temperament(usize),
    Value(String),
}

fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        // 空行等同再抓一隻
        return Some(Command::Discover);
    }

    let (keyword, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (trimmed, ""),
    };

    match keyword {
        "discover" | "d" => Some(Command::Discover),
        "ban" if !rest.is_empty() => Some(Command::Ban(parse_ban_target(rest))),
        "unban" if !rest.is_empty() => Some(Command::Unban(rest.to_string())),
        "banlist" | "bans" => Some(Command::BanList),
        "history" => Some(Command::History),
        "export" => Some(Command::Export),
        "help" | "?" => Some(Command::Help),
        "quit" | "exit" | "q" => Some(Command::Quit),
        _ => None,
    }
}

fn parse_ban_target(rest: &str) -> BanTarget {
    if let Some(("temp", index)) = rest.split_once(char::is_whitespace) {
        if let Ok(position) = index.trim().parse::<usize>() {
            return BanTarget::Temperament(position);
        }
    }

    match rest {
        "breed" => BanTarget::Breed,
        "origin" => BanTarget::Origin,
        _ => BanTarget::Value(rest.to_string()),
    }
}

fn print_current(state: &AppState) {
    if let Some(error) = &state.error {
        println!("❌ {}", error);
    }

    let Some(dog) = &state.current else {
        return;
    };

    println!("🐶 Breed: {}   (ban breed)", dog.breed.name);
    println!("   🖼  {}", dog.image_url);

    let tokens = dog.breed.temperament_tokens();
    if tokens.is_empty() {
        println!("   😊 Temperament: Unknown");
    } else {
        let rendered: Vec<String> = tokens
            .iter()
            .enumerate()
            .map(|(i, token)| format!("[{}] {}", i + 1, token))
            .collect();
        println!(
            "   😊 Temperament: {}   (ban temp <n>)",
            rendered.join("  ")
        );
    }

    println!(
        "   🌍 Origin: {}   (ban origin)",
        dog.breed.origin.as_deref().unwrap_or("Unknown")
    );
}

fn print_ban_list(state: &AppState) {
    if state.ban_list.is_empty() {
        println!("🚫 Ban list is empty.");
        return;
    }

    println!("🚫 Ban list ({} values, unban <value> to remove):", state.ban_list.len());
    for value in state.ban_list.iter() {
        println!("   - {}", value);
    }
}

fn print_history(state: &AppState) {
    if state.history.is_empty() {
        println!("📜 No discoveries yet.");
        return;
    }

    println!("📜 Discovery history (most recent first):");
    for (index, dog) in state.history.iter().enumerate() {
        println!(
            "   {:>2}. {} ({}) {}",
            index + 1,
            dog.breed.name,
            dog.breed.origin.as_deref().unwrap_or("Unknown origin"),
            dog.image_url
        );
    }
}

fn print_help() {
    println!("Commands:");
    println!("   discover | d | <empty>   fetch a new dog");
    println!("   ban breed                ban the current dog's breed");
    println!("   ban origin               ban the current dog's origin");
    println!("   ban temp <n>             ban the n-th temperament shown");
    println!("   ban <value>              ban an arbitrary value");
    println!("   unban <value>            remove a value from the ban list");
    println!("   banlist                  show the ban list");
    println!("   history                  show up to the last 10 dogs");
    println!("   export                   write the history to CSV/TSV");
    println!("   quit                     leave");
}

fn exit_with_config_error(err: dog_discoverer::DogError) -> ! {
    tracing::error!("❌ Configuration validation failed: {}", err);
    eprintln!("❌ {}", err.user_friendly_message());
    eprintln!("💡 {}", err.recovery_suggestion());
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting dog-discoverer CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // --config 存在時由檔案提供 discovery/export 設定
    let file_config = match cli.config.as_deref() {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => exit_with_config_error(e),
        },
        None => None,
    };

    let settings: &dyn ConfigProvider = match &file_config {
        Some(config) => config,
        None => &cli,
    };

    let validation = match &file_config {
        Some(config) => config.validate(),
        None => cli.validate(),
    };
    if let Err(e) = validation {
        exit_with_config_error(e);
    }

    // API 金鑰優先序：--api-key > 設定檔 > DOG_API_KEY
    let api_key = cli
        .api_key
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.api_key()))
        .or_else(|| std::env::var(API_KEY_ENV).ok());

    let monitor_enabled = cli.monitor
        || file_config
            .as_ref()
            .map(|c| c.monitoring_enabled())
            .unwrap_or(false);
    let monitor = SessionMonitor::new(monitor_enabled);
    if monitor.is_enabled() {
        tracing::info!("🔍 Session monitoring enabled");
    }

    let mut source = TheDogApi::new(settings.api_endpoint().to_string());
    match api_key {
        Some(key) => source = source.with_api_key(key),
        None => tracing::warn!(
            "🔑 No API key configured ({} unset); the API may throttle anonymous requests",
            API_KEY_ENV
        ),
    }
    if let Some(timeout) = settings.timeout_seconds() {
        source = source.with_timeout(Duration::from_secs(timeout));
    }
    if let Some(headers) = file_config.as_ref().and_then(|c| c.discover.headers.as_ref()) {
        for (name, value) in headers {
            source = source.with_header(name, value);
        }
    }

    run_session(source, settings, file_config.as_ref(), &monitor).await?;

    monitor.log_final_stats();
    println!("👋 Bye!");
    Ok(())
}

async fn run_session<S: DogSource>(
    source: S,
    settings: &dyn ConfigProvider,
    file_config: Option<&TomlConfig>,
    monitor: &SessionMonitor,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = DiscoverEngine::with_max_attempts(source, settings.max_attempts());
    let mut app = DiscoverApp::new(engine);

    // 啟動時先抓一隻，對應原本頁面載入的行為
    println!("🐾 Discovering your first dog...");
    if app.discover().await {
        monitor.record_discovery();
    }
    print_current(app.state());
    println!("💡 Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("🐶 > ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let Some(command) = parse_command(&line) else {
            println!("❓ Unknown command. Type 'help' for the list.");
            continue;
        };

        match command {
            Command::Discover => {
                if app.discover().await {
                    monitor.record_discovery();
                }
                print_current(app.state());
            }
            Command::Ban(target) => {
                ban_target(&mut app, target, monitor).await;
                print_current(app.state());
            }
            Command::Unban(value) => {
                app.unban(&value);
                print_ban_list(app.state());
            }
            Command::BanList => print_ban_list(app.state()),
            Command::History => print_history(app.state()),
            Command::Export => export_history(&app, settings, file_config).await,
            Command::Help => print_help(),
            Command::Quit => break,
        }
    }

    Ok(())
}

async fn ban_target<S: DogSource>(
    app: &mut DiscoverApp<S>,
    target: BanTarget,
    monitor: &SessionMonitor,
) {
    let history_before = app.state().history.len();

    match target {
        BanTarget::Breed => match app.state().current.as_ref().map(|d| d.breed.name.clone()) {
            Some(name) => {
                println!("🚫 Banning breed '{}'", name);
                app.ban(name).await;
            }
            None => println!("❓ No dog on display yet."),
        },
        BanTarget::Origin => {
            match app
                .state()
                .current
                .as_ref()
                .and_then(|d| d.breed.origin.clone())
            {
                Some(origin) => {
                    println!("🚫 Banning origin '{}'", origin);
                    app.ban(origin).await;
                }
                None => println!("❓ The current dog has no origin recorded."),
            }
        }
        BanTarget::Temperament(position) => {
            let token = app.state().current.as_ref().and_then(|d| {
                d.breed
                    .temperament_tokens()
                    .get(position.wrapping_sub(1))
                    .map(|t| t.to_string())
            });
            match token {
                Some(token) => {
                    println!("🚫 Banning temperament '{}'", token);
                    app.ban_temperament(&token).await;
                }
                None => println!("❓ No temperament at position {}.", position),
            }
        }
        BanTarget::Value(value) => {
            println!("🚫 Banning '{}'", value);
            app.ban(value).await;
        }
    }

    // ban 引發的自動補抓也算一次 discovery
    if app.state().history.len() > history_before {
        monitor.record_discovery();
    }
}

async fn export_history<S: DogSource>(
    app: &DiscoverApp<S>,
    settings: &dyn ConfigProvider,
    file_config: Option<&TomlConfig>,
) {
    let storage = LocalStorage::new(settings.output_path().to_string());
    let exporter = match file_config {
        Some(config) => {
            let (csv, tsv) = config.export_filenames();
            HistoryExporter::with_filenames(storage, csv, tsv)
        }
        None => HistoryExporter::new(storage),
    };

    match exporter.export(&app.state().history).await {
        Ok(files) => println!(
            "📁 Exported {} to {}",
            files.join(" and "),
            settings.output_path()
        ),
        Err(e) => {
            tracing::error!("❌ Export failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_discover_aliases() {
        assert_eq!(parse_command("discover"), Some(Command::Discover));
        assert_eq!(parse_command("d"), Some(Command::Discover));
        assert_eq!(parse_command("   "), Some(Command::Discover));
    }

    #[test]
    fn test_parse_ban_targets() {
        assert_eq!(parse_command("ban breed"), Some(Command::Ban(BanTarget::Breed)));
        assert_eq!(parse_command("ban origin"), Some(Command::Ban(BanTarget::Origin)));
        assert_eq!(
            parse_command("ban temp 2"),
            Some(Command::Ban(BanTarget::Temperament(2)))
        );
        assert_eq!(
            parse_command("ban Great Dane"),
            Some(Command::Ban(BanTarget::Value("Great Dane".to_string())))
        );
    }

    #[test]
    fn test_parse_ban_without_value_is_unknown() {
        assert_eq!(parse_command("ban"), None);
        assert_eq!(parse_command("unban"), None);
    }

    #[test]
    fn test_parse_unban_keeps_value_verbatim() {
        assert_eq!(
            parse_command("unban Great Dane"),
            Some(Command::Unban("Great Dane".to_string()))
        );
    }

    #[test]
    fn test_parse_misc_commands() {
        assert_eq!(parse_command("banlist"), Some(Command::BanList));
        assert_eq!(parse_command("history"), Some(Command::History));
        assert_eq!(parse_command("export"), Some(Command::Export));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("definitely-not-a-command"), None);
    }
}
