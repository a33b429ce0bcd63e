//! Workout Coach - 自托管健身追踪与教练服务
//!
//! Usage:
//! - Normal mode: `workout-coach`
//! - With custom port: `workout-coach --port 8080`
//! - With custom data directory: `workout-coach --data-dir /var/lib/workout-coach`

use std::path::PathBuf;

use workout_coach::RuntimeConfig;

/// 解析命令行参数
fn parse_args() -> RuntimeConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = RuntimeConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--port" if i + 1 < args.len() => {
                config.port_override = args[i + 1].parse().ok();
                i += 2;
            }
            "--data-dir" if i + 1 < args.len() => {
                config.data_dir_override = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => {
                i += 1;
            }
        }
    }

    config
}

fn print_help() {
    println!("Workout Coach - self-hosted fitness tracking & coaching service");
    println!();
    println!("USAGE:");
    println!("    workout-coach [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --port <PORT>          Override the listening port");
    println!("    --data-dir <DIR>       Override the data directory");
    println!("    -h, --help             Print help information");
    println!();
    println!("ENVIRONMENT:");
    println!("    PORT                   Listening port (default 5000)");
    println!("    WORKOUT_DATA_DIR       Data directory for workouts.json");
    println!("    WORKOUT_API_KEY        Require x-api-key on mutating endpoints");
    println!("    OPENAI_API_KEY         Enable AI coach recommendations");
    println!("    WORKOUT_COACH_MODEL    Chat model (default gpt-3.5-turbo)");
}

fn main() {
    let config = parse_args();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create runtime");
    if let Err(e) = rt.block_on(workout_coach::init_and_run(config)) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
