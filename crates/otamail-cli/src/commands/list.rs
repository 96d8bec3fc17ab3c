//! Registry listings.

use console::style;

use otamail_core::{list_platforms, list_templates, Template};

pub fn platforms() -> anyhow::Result<()> {
    println!("{}", style("Supported platforms:").bold());
    for (id, name) in list_platforms() {
        println!("  {:<12} {}", style(id).cyan(), name);
    }
    Ok(())
}

pub fn templates() -> anyhow::Result<()> {
    let default = Template::default();

    println!("{}", style("Summary templates:").bold());
    for (id, name, description) in list_templates() {
        let marker = if id == default.id() { "*" } else { " " };
        println!(
            "{} {:<12} {:<18} {}",
            marker,
            style(id).cyan(),
            name,
            style(description).dim()
        );
    }
    Ok(())
}
