use json2record::cli::CommandLineInterface;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let command_line_interface = CommandLineInterface::load();
    if let Err(error) = command_line_interface.run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}
