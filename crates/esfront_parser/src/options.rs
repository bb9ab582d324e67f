//! Parser configuration.

use esfront_ast::types::SourceType;
use serde::{Deserialize, Serialize};

/// Options for one parse. All features are off by default.
///
/// Deserializes from camelCase JSON, so outer tooling can keep it in a
/// config file:
///
/// ```json
/// { "jsx": true, "typescript": true, "sourceType": "module" }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserOptions {
    pub jsx: bool,
    /// Allow `<ns:name>` tag and attribute names. Requires `jsx`.
    pub jsx_namespace: bool,
    pub typescript: bool,
    /// Parse the whole input as strict mode code.
    pub strict: bool,
    pub source_type: SourceType,
}

bitflags::bitflags! {
    /// Syntax features enabled for a parse.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Features: u8 {
        const JSX           = 1 << 0;
        const JSX_NAMESPACE = 1 << 1;
        const TYPESCRIPT    = 1 << 2;
        const STRICT        = 1 << 3;
        const MODULE        = 1 << 4;
    }
}

impl ParserOptions {
    pub fn with_jsx(mut self, jsx: bool) -> Self {
        self.jsx = jsx;
        self
    }

    pub fn with_jsx_namespace(mut self, jsx_namespace: bool) -> Self {
        self.jsx_namespace = jsx_namespace;
        self
    }

    pub fn with_typescript(mut self, typescript: bool) -> Self {
        self.typescript = typescript;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_source_type(mut self, source_type: SourceType) -> Self {
        self.source_type = source_type;
        self
    }

    /// Lower to a feature set. Namespaced names are dropped without `jsx`,
    /// and modules are always strict.
    pub fn features(&self) -> Features {
        let mut features = Features::empty();
        features.set(Features::JSX, self.jsx);
        features.set(Features::JSX_NAMESPACE, self.jsx && self.jsx_namespace);
        features.set(Features::TYPESCRIPT, self.typescript);
        features.set(Features::MODULE, self.source_type == SourceType::Module);
        features.set(Features::STRICT, self.strict || self.source_type == SourceType::Module);
        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_features_are_empty() {
        assert_eq!(ParserOptions::default().features(), Features::empty());
    }

    #[test]
    fn test_builders() {
        let options = ParserOptions::default()
            .with_jsx(true)
            .with_jsx_namespace(true)
            .with_typescript(true);
        assert_eq!(
            options.features(),
            Features::JSX | Features::JSX_NAMESPACE | Features::TYPESCRIPT
        );
    }

    #[test]
    fn test_namespace_requires_jsx() {
        let options = ParserOptions::default().with_jsx_namespace(true);
        assert!(!options.features().contains(Features::JSX_NAMESPACE));
    }

    #[test]
    fn test_module_implies_strict() {
        let options = ParserOptions::default().with_source_type(SourceType::Module);
        assert!(options.features().contains(Features::MODULE | Features::STRICT));
    }

    #[test]
    fn test_deserialize_camel_case() {
        let options: ParserOptions =
            serde_json::from_str(r#"{ "jsx": true, "jsxNamespace": true, "sourceType": "module" }"#).unwrap();
        assert!(options.jsx && options.jsx_namespace);
        assert!(!options.typescript);
        assert_eq!(options.source_type, SourceType::Module);
    }
}
