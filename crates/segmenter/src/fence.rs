/// Language named in a fence info string (the text after the opening marker)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FenceLanguage {
    Rust,
    Python,
    JavaScript,
    TypeScript,
    Go,
    Java,
    C,
    Cpp,
    CSharp,
    Ruby,
    Swift,
    Kotlin,
    Bash,
    Unknown,
}

impl FenceLanguage {
    /// Detect language from a fence tag such as `rust` or `ts`
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "rust" | "rs" => FenceLanguage::Rust,
            "python" | "py" | "python3" => FenceLanguage::Python,
            "javascript" | "js" | "jsx" | "mjs" => FenceLanguage::JavaScript,
            "typescript" | "ts" | "tsx" => FenceLanguage::TypeScript,
            "go" | "golang" => FenceLanguage::Go,
            "java" => FenceLanguage::Java,
            "c" | "h" => FenceLanguage::C,
            "cpp" | "c++" | "cc" | "cxx" | "hpp" => FenceLanguage::Cpp,
            "csharp" | "cs" | "c#" => FenceLanguage::CSharp,
            "ruby" | "rb" => FenceLanguage::Ruby,
            "swift" => FenceLanguage::Swift,
            "kotlin" | "kt" | "kts" => FenceLanguage::Kotlin,
            "bash" | "sh" | "shell" | "zsh" => FenceLanguage::Bash,
            _ => FenceLanguage::Unknown,
        }
    }

    /// Detect language from a full fence line (`` ```rust,ignore ``).
    /// Returns `None` when the line is not a fence or carries no tag.
    pub fn from_fence_line(line: &str, marker: &str) -> Option<Self> {
        let info = line.trim().strip_prefix(marker)?;
        let tag = info
            .trim_start_matches(|c: char| c == marker.chars().next().unwrap_or('`'))
            .trim_start()
            .split(|c: char| c.is_whitespace() || c == ',' || c == '{')
            .next()
            .unwrap_or("")
            .trim();

        if tag.is_empty() {
            None
        } else {
            Some(Self::from_tag(tag))
        }
    }

    /// Get language name as string
    pub fn as_str(self) -> &'static str {
        match self {
            FenceLanguage::Rust => "rust",
            FenceLanguage::Python => "python",
            FenceLanguage::JavaScript => "javascript",
            FenceLanguage::TypeScript => "typescript",
            FenceLanguage::Go => "go",
            FenceLanguage::Java => "java",
            FenceLanguage::C => "c",
            FenceLanguage::Cpp => "cpp",
            FenceLanguage::CSharp => "csharp",
            FenceLanguage::Ruby => "ruby",
            FenceLanguage::Swift => "swift",
            FenceLanguage::Kotlin => "kotlin",
            FenceLanguage::Bash => "bash",
            FenceLanguage::Unknown => "unknown",
        }
    }

    /// Check if this is a language the segmenter knows about
    pub fn is_recognized(self) -> bool {
        !matches!(self, FenceLanguage::Unknown)
    }
}
