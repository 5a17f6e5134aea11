use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

const SQL_KEYWORDS: &[&str] = &["CREATE TABLE IF NOT EXISTS", "CREATE INDEX IF NOT EXISTS"];

pub fn header(text: &str) {
    println!("{} {}", Icons::ROCKET, text.style(theme().header.clone()));
}

pub fn banner(title: &str, subtitle: &str) {
    if crate::output::is_quiet() {
        return;
    }
    println!();
    println!("{}", title);
    println!("{}", subtitle.style(theme().dim.clone()));
    println!();
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn info(label: &str, value: &str) {
    println!(
        "{} {}: {}",
        Icons::INFO.style(theme().info.clone()),
        label.style(theme().dim.clone()),
        value
    );
}

pub fn section(title: &str) {
    if crate::output::is_quiet() {
        return;
    }
    println!();
    println!("━{}━", title.style(theme().header.clone()));
}

pub fn dim(text: &str) -> String {
    text.style(theme().dim.clone()).to_string()
}

pub fn summary_row(label: &str, value: &str) {
    println!("  {} {}", label.style(theme().dim.clone()), value);
}

/// Print a schema script with its DDL keywords highlighted
pub fn sql(script: &str) {
    for line in script.lines() {
        match SQL_KEYWORDS.iter().find(|k| line.starts_with(*k)) {
            Some(keyword) => println!(
                "{}{}",
                keyword.style(theme().keyword.clone()),
                &line[keyword.len()..]
            ),
            None if line.starts_with("--") => println!("{}", dim(line)),
            None => println!("{}", line),
        }
    }
}
