pub const INSILICOGEL_DISPLAY_VERSION: &str = env!("INSILICOGEL_DISPLAY_VERSION");
pub const INSILICOGEL_BUILD_N: &str = env!("INSILICOGEL_BUILD_N");

pub fn version_cli_text() -> String {
    format!(
        "insilicogel {}\nBuild {}\nIn-silico agarose gel electrophoresis renderer",
        INSILICOGEL_DISPLAY_VERSION, INSILICOGEL_BUILD_N
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_cli_text() {
        let text = version_cli_text();
        assert!(text.starts_with("insilicogel "));
        assert!(text.contains("Build "));
    }
}
