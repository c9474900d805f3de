use std::process::ExitCode;

fn main() -> ExitCode {
    let matches = apiref_cli::command().get_matches();

    if let Err(err) = apiref_cli::logging::init(matches.get_flag("log-json")) {
        eprintln!("warning: {err}");
    }

    let stdout = std::io::stdout();
    match apiref_cli::run(&matches, &mut stdout.lock()) {
        Ok(report) if report.failures == 0 => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
