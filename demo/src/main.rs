use demo::MyApp;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();
    eframe::run_native(
        "waymark demo",
        Default::default(),
        Box::new(|_cc| Ok(Box::new(MyApp::default()))),
    )
}
