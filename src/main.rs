use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::process::ExitCode;
use wheel_of_fortune::cli::{CliInterface, parse_cli};
use wheel_of_fortune::{game_loop, info_log};
use wheel_of_fortune::logging::init_logging;
use wheel_of_fortune::phrasebank::{
    EMBEDDED_PHRASEBANK, load_phrasebank_from_file, load_phrasebank_from_str,
};
use wheel_of_fortune::tui::TuiInterface;

fn main() -> ExitCode {
    let cli = parse_cli();
    let log_path = init_logging(cli.verbose, cli.tui);

    let phrases = match &cli.phrasebank_path {
        Some(path) => match load_phrasebank_from_file(path) {
            Ok(phrases) => phrases,
            Err(e) => {
                eprintln!("Failed to load phrase bank from '{path}': {e}");
                return ExitCode::FAILURE;
            }
        },
        None => load_phrasebank_from_str(EMBEDDED_PHRASEBANK),
    };
    if phrases.is_empty() {
        eprintln!("The phrase bank contains no usable phrases.");
        return ExitCode::FAILURE;
    }
    info_log!("Loaded {} phrases", phrases.len());

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let config = cli.game_config();

    if cli.tui {
        let mut interface = match TuiInterface::new() {
            Ok(interface) => interface,
            Err(e) => {
                eprintln!("Failed to start the terminal UI: {e}");
                return ExitCode::FAILURE;
            }
        };
        game_loop(&phrases, &mut interface, &mut rng, &config);
        drop(interface);
        if let Some(path) = log_path {
            println!("Log written to {}", path.display());
        }
    } else {
        let mut interface = CliInterface::new(io::stdin().lock());
        game_loop(&phrases, &mut interface, &mut rng, &config);
    }
    ExitCode::SUCCESS
}
