//! Help page detection from file names.
//!
//! Help pages are exported as `<Product>Help<Kind>.html`, e.g.
//! `EidosHelpClasses.html` or `SLiMHelpCallbacks.html`.

use crate::error::{Error, Result};
use crate::model::DocKind;
use crate::parser::ClassPreset;
use std::fmt;
use std::path::Path;

/// Product a help page documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Product {
    #[default]
    Eidos,
    Slim,
}

impl Product {
    pub fn as_str(&self) -> &'static str {
        match self {
            Product::Eidos => "eidos",
            Product::Slim => "slim",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recognized help page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpPage {
    pub product: Product,
    pub kind: DocKind,
}

impl HelpPage {
    /// Class style preset matching the page's product.
    pub fn preset(&self) -> ClassPreset {
        match self.product {
            Product::Eidos => ClassPreset::Eidos,
            Product::Slim => ClassPreset::Slim,
        }
    }

    /// Conventional output file name, e.g. `eidos_classes.json`.
    pub fn output_file_name(&self) -> String {
        format!("{}_{}.json", self.product, self.kind)
    }
}

impl fmt::Display for HelpPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.product, self.kind)
    }
}

/// Detect the help page a file holds from its name.
///
/// # Example
/// ```
/// use slimhelp::detect::{detect_page_from_path, Product};
/// use slimhelp::DocKind;
///
/// let page = detect_page_from_path("SLiMHelpCallbacks.html").unwrap();
/// assert_eq!(page.product, Product::Slim);
/// assert_eq!(page.kind, DocKind::Callbacks);
/// assert_eq!(page.output_file_name(), "slim_callbacks.json");
/// ```
pub fn detect_page_from_path<P: AsRef<Path>>(path: P) -> Result<HelpPage> {
    let path = path.as_ref();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let product = if stem.starts_with("slim") {
        Product::Slim
    } else {
        Product::Eidos
    };

    let kind = if stem.contains("class") {
        DocKind::Classes
    } else if stem.contains("function") {
        DocKind::Functions
    } else if stem.contains("operator") {
        DocKind::Operators
    } else if stem.contains("type") {
        DocKind::Types
    } else if stem.contains("callback") || stem.contains("event") {
        DocKind::Callbacks
    } else {
        return Err(Error::UnknownKind(path.display().to_string()));
    };

    Ok(HelpPage { product, kind })
}

/// Detect the document kind and class preset of a help page.
pub fn detect_kind_from_path<P: AsRef<Path>>(path: P) -> Result<(DocKind, ClassPreset)> {
    let page = detect_page_from_path(path)?;
    Ok((page.kind, page.preset()))
}

/// Check if a path looks like a help page export.
pub fn is_help_page<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    let is_html = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
        .unwrap_or(false);
    is_html && detect_page_from_path(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_known_pages() {
        let cases = [
            ("EidosHelpClasses.html", Product::Eidos, DocKind::Classes),
            ("SLiMHelpClasses.html", Product::Slim, DocKind::Classes),
            ("EidosHelpFunctions.html", Product::Eidos, DocKind::Functions),
            ("EidosHelpOperators.html", Product::Eidos, DocKind::Operators),
            ("EidosHelpTypes.html", Product::Eidos, DocKind::Types),
            ("SLiMHelpCallbacks.html", Product::Slim, DocKind::Callbacks),
        ];
        for (name, product, kind) in cases {
            let page = detect_page_from_path(name).unwrap();
            assert_eq!(page, HelpPage { product, kind }, "{name}");
        }
    }

    #[test]
    fn test_preset_follows_product() {
        let (kind, preset) = detect_kind_from_path("docs/SLiMHelpClasses.html").unwrap();
        assert_eq!(kind, DocKind::Classes);
        assert_eq!(preset, ClassPreset::Slim);

        let (_, preset) = detect_kind_from_path("EidosHelpClasses.html").unwrap();
        assert_eq!(preset, ClassPreset::Eidos);
    }

    #[test]
    fn test_output_file_name() {
        let page = detect_page_from_path("EidosHelpClasses.html").unwrap();
        assert_eq!(page.output_file_name(), "eidos_classes.json");
    }

    #[test]
    fn test_unknown_page() {
        let result = detect_page_from_path("index.html");
        assert!(matches!(result, Err(Error::UnknownKind(_))));
        assert!(!is_help_page("index.html"));
        assert!(!is_help_page("EidosHelpTypes.pdf"));
        assert!(is_help_page("EidosHelpTypes.html"));
    }
}
