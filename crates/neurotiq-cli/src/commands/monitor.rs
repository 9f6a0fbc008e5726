use neurotiq_core::StreamConfig;

pub fn run(config: StreamConfig) {
    let mut app = match crate::tui::app::App::new(config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = app.run() {
        eprintln!("TUI error: {e}");
        std::process::exit(1);
    }
}
