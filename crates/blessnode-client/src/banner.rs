//! Startup banner.

const WIDTH: usize = 44;

/// Returns the banner as printable lines.
#[must_use]
pub fn banner_lines() -> Vec<String> {
    let rule = format!("+{}+", "=".repeat(WIDTH));
    vec![
        rule.clone(),
        boxed("BLESS NETWORK NODE CLIENT"),
        boxed(&format!("v{}", env!("CARGO_PKG_VERSION"))),
        rule,
    ]
}

/// Prints the banner to stdout, framed by blank lines.
pub fn print_banner() {
    println!();
    for line in banner_lines() {
        println!("{line}");
    }
    println!();
}

fn boxed(text: &str) -> String {
    format!("|{text:^WIDTH$}|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_share_width() {
        let lines = banner_lines();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.chars().count() == WIDTH + 2));
        assert!(lines[1].contains("BLESS NETWORK NODE CLIENT"));
    }
}
