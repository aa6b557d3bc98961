use console::style;
use zyra_core::Warning;

pub(crate) fn heading(title: &str) {
    println!();
    println!("  {}", style(title).cyan().bold().underlined());
    println!();
}

pub(crate) fn success(message: impl AsRef<str>) {
    println!(
        "  {} {}",
        style("✓").green().bold(),
        style(message.as_ref()).dim()
    );
}

pub(crate) fn warnings(warnings: &[Warning]) {
    for warning in warnings {
        println!("  {} {}", style("!").yellow().bold(), style(warning).yellow());
    }
}

pub(crate) fn done(message: impl AsRef<str>) {
    println!();
    println!("  {}", style(message.as_ref()).green().bold());
    println!();
}
