use quakemap::QuakeMapApp;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();
    eframe::run_native(
        "quakemap",
        Default::default(),
        Box::new(|cc| Ok(Box::new(QuakeMapApp::new(cc.egui_ctx.clone())))),
    )
}
