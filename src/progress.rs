use std::borrow::Cow;

use indicatif::{ProgressBar, ProgressStyle};

pub fn default_style() -> ProgressStyle {
    match ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
    {
        Ok(style) => style.progress_chars("##-"),
        Err(_) => ProgressStyle::default_bar(),
    }
}

/// A bar sized for `len` items, labelled with the phase it tracks.
pub fn sized_bar(len: u64, msg: impl Into<Cow<'static, str>>) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_style(default_style());
    bar.set_message(msg);
    bar
}
