use breakbell_core::{Database, Theme, ThemePreference};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the stored theme
    Show,
    /// Switch between light and dark
    Toggle,
    /// Set the theme explicitly
    Set {
        /// "light" or "dark"
        theme: Theme,
    },
}

pub fn run(action: ThemeAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut pref = ThemePreference::load(Database::open()?)?;

    match action {
        ThemeAction::Show => {}
        ThemeAction::Toggle => {
            pref.toggle_theme()?;
        }
        ThemeAction::Set { theme } => pref.set(theme)?,
    }
    println!("{}", pref.current());
    Ok(())
}
