use gpui::{App, Application};

use chessboard::app::{self, HostOptions};
use chessboard::domain::BoardAttributes;
use chessboard::ui::FileAssets;

fn main() {
    env_logger::init();

    // board attributes as name=value arguments
    let args: Vec<String> = std::env::args().skip(1).collect();
    let pairs = args.iter().filter_map(|arg| {
        let pair = arg.split_once('=');
        if pair.is_none() {
            log::warn!("ignoring argument {:?}, expected name=value", arg);
        }
        pair
    });
    let attributes = BoardAttributes::from_pairs(pairs);
    let options = HostOptions::from_env();

    Application::new()
        .with_assets(FileAssets::new())
        .run(move |cx: &mut App| {
            if let Err(err) = app::run(cx, attributes, options) {
                log::error!("{:#}", err);
                cx.quit();
            }
        });
}
