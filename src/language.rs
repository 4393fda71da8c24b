/*!
 * File-name to fenced-code-block language lookup
 */

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;

/// Extension (with leading dot, lowercase) to language tag
static LANGUAGE_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Python
        (".py", "python"),
        (".pyi", "python"),
        (".pyw", "python"),
        // JavaScript/TypeScript
        (".js", "javascript"),
        (".jsx", "jsx"),
        (".ts", "typescript"),
        (".tsx", "tsx"),
        (".mjs", "javascript"),
        (".cjs", "javascript"),
        // Web
        (".html", "html"),
        (".htm", "html"),
        (".css", "css"),
        (".scss", "scss"),
        (".sass", "sass"),
        (".less", "less"),
        // Markup/Config
        (".json", "json"),
        (".xml", "xml"),
        (".yaml", "yaml"),
        (".yml", "yaml"),
        (".toml", "toml"),
        (".ini", "ini"),
        (".cfg", "ini"),
        (".conf", "conf"),
        // Shell
        (".sh", "bash"),
        (".bash", "bash"),
        (".zsh", "zsh"),
        (".fish", "fish"),
        // C/C++
        (".c", "c"),
        (".h", "c"),
        (".cpp", "cpp"),
        (".cc", "cpp"),
        (".cxx", "cpp"),
        (".hpp", "cpp"),
        (".hxx", "cpp"),
        // C#
        (".cs", "csharp"),
        // Java/Kotlin/Scala
        (".java", "java"),
        (".kt", "kotlin"),
        (".kts", "kotlin"),
        (".scala", "scala"),
        // Go
        (".go", "go"),
        // Rust
        (".rs", "rust"),
        // Ruby
        (".rb", "ruby"),
        (".rake", "ruby"),
        // PHP
        (".php", "php"),
        // Swift
        (".swift", "swift"),
        // R
        (".r", "r"),
        // Markdown
        (".md", "markdown"),
        (".markdown", "markdown"),
        // SQL
        (".sql", "sql"),
        // Misc
        (".txt", "text"),
        (".log", "text"),
        (".csv", "csv"),
        (".graphql", "graphql"),
        (".proto", "protobuf"),
    ])
});

/// Well-known file names without a usable extension (lowercase)
static SPECIAL_FILES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("dockerfile", "dockerfile"),
        ("makefile", "makefile"),
        ("rakefile", "ruby"),
        ("gemfile", "ruby"),
        ("vagrantfile", "ruby"),
        (".bashrc", "bash"),
        (".zshrc", "zsh"),
        (".vimrc", "vim"),
        (".gitignore", "text"),
        (".dockerignore", "text"),
        (".npmrc", "text"),
        (".editorconfig", "ini"),
    ])
});

/// Resolve the language tag for a file name
///
/// Unknown extensions fall back to the raw extension text; extensionless
/// unknown files fall back to `text`.
pub fn get_language(path: &Path) -> String {
    let basename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if let Some(language) = SPECIAL_FILES.get(basename.as_str()) {
        return (*language).to_string();
    }

    match path.extension() {
        Some(ext) => {
            let ext = ext.to_string_lossy().to_lowercase();
            let dotted = format!(".{}", ext);
            match LANGUAGE_MAP.get(dotted.as_str()) {
                Some(language) => (*language).to_string(),
                None => ext,
            }
        }
        None => "text".to_string(),
    }
}
