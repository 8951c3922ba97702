use indicatif::{ProgressBar, ProgressStyle};

/// A spinner on stderr for the duration of a clone. Hidden when stderr is not a terminal.
pub fn make_progress_spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(std::time::Duration::from_millis(120));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg:.cyan/blue}") {
        pb.set_style(style.tick_strings(&[
            "▹▹▹▹▹",
            "▸▹▹▹▹",
            "▹▸▹▹▹",
            "▹▹▸▹▹",
            "▹▹▹▸▹",
            "▹▹▹▹▸",
            "▪▪▪▪▪",
        ]));
    }
    pb.set_message(message);
    pb
}
