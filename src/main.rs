use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // .env antes de inicializar el logger (RUST_LOG puede venir de ahí).
    op_core::config::init_dotenv();
    // Logs a stderr; stdout queda para el JSON de la respuesta.
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env())
                             .with_writer(std::io::stderr)
                             .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match opflow::cli::run(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("[opflow] {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
