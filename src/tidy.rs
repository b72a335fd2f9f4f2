//! Mechanical code quality checks over `src/`, run as a unit test.
//!
//! `rustfmt --check` and `cargo clippy` are expected to run separately in CI.
//! This linter covers project rules those tools do not know about.
//!
//! **Critical** (fails the test)
//! - No `.unwrap()` / `.expect()` outside `#[cfg(test)]` code.
//! - Public functions, methods, structs, enums and traits are documented.
//! - Public parameters spell out `sequence_number` and `context`.
//! - No `FIXME` comments, no `utils.rs`-style modules.
//!
//! **Ratchet** (fails the test, raise the limit consciously)
//! - Module size high-water mark.
//! - Struct field count.

use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};

use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::visit::{self, Visit};
use syn::{
    Attribute, ExprMethodCall, FnArg, ImplItemFn, ItemEnum, ItemFn, ItemMod, ItemStruct,
    ItemTrait, Pat, PatType, Signature, Visibility,
};

/// Max fields in any struct.
const STRUCT_FIELD_COUNT_MAX: usize = 12;

/// Max lines in any module, tests included.
const MODULE_SIZE_HIGH_WATER_MARK: usize = 800;

/// Parameter names that must be spelled out in public signatures.
const ABBREVIATED_PARAMETERS: &[(&str, &str)] = &[
    ("ctx", "context"),
    ("sn", "sequence_number"),
    ("seq_num", "sequence_number"),
    ("seq", "sequence_number"),
];

const ANTI_PATTERN_MODULES: &[&str] = &["utils.rs", "helpers.rs", "misc.rs", "common.rs"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Severity {
    Ratchet,
    Critical,
}

#[derive(Debug)]
struct TidyViolation {
    severity: Severity,
    path: String,
    line: usize,
    message: String,
}

impl TidyViolation {
    fn new(severity: Severity, path: &Path, line: usize, message: impl Into<String>) -> Self {
        TidyViolation {
            severity,
            path: path.to_string_lossy().to_string(),
            line,
            message: message.into(),
        }
    }
}

/// Walks one parsed file. Items under `#[cfg(test)]` are skipped entirely.
struct TidyVisitor<'a> {
    path: &'a Path,
    violations: Vec<TidyViolation>,
}

impl<'a> TidyVisitor<'a> {
    fn new(path: &'a Path) -> Self {
        Self {
            path,
            violations: Vec::new(),
        }
    }

    fn add_violation(&mut self, severity: Severity, span: Span, message: impl Into<String>) {
        self.violations.push(TidyViolation::new(
            severity,
            self.path,
            span.start().line,
            message,
        ));
    }

    fn check_public_item(&mut self, kind: &str, attrs: &[Attribute], name: &syn::Ident) {
        if !has_doc(attrs) {
            self.add_violation(
                Severity::Critical,
                name.span(),
                format!("Public {} '{}' must have documentation.", kind, name),
            );
        }
    }

    fn check_public_signature(&mut self, signature: &Signature) {
        for arg in &signature.inputs {
            let FnArg::Typed(PatType { pat, .. }) = arg else {
                continue;
            };
            let Pat::Ident(pat_ident) = &**pat else {
                continue;
            };
            let name = pat_ident.ident.to_string();
            if let Some((_, preferred)) = ABBREVIATED_PARAMETERS
                .iter()
                .find(|(abbreviation, _)| *abbreviation == name)
            {
                self.add_violation(
                    Severity::Critical,
                    pat_ident.ident.span(),
                    format!(
                        "Public parameter '{}' in '{}' must be named '{}'.",
                        name, signature.ident, preferred
                    ),
                );
            }
        }
    }
}

impl<'ast> Visit<'ast> for TidyVisitor<'_> {
    fn visit_item_mod(&mut self, item: &'ast ItemMod) {
        if is_cfg_test(&item.attrs) {
            return;
        }
        visit::visit_item_mod(self, item);
    }

    fn visit_item_fn(&mut self, item: &'ast ItemFn) {
        if is_cfg_test(&item.attrs) {
            return;
        }
        if matches!(item.vis, Visibility::Public(_)) {
            self.check_public_item("function", &item.attrs, &item.sig.ident);
            self.check_public_signature(&item.sig);
        }
        visit::visit_item_fn(self, item);
    }

    fn visit_impl_item_fn(&mut self, item: &'ast ImplItemFn) {
        if is_cfg_test(&item.attrs) {
            return;
        }
        if matches!(item.vis, Visibility::Public(_)) {
            self.check_public_item("method", &item.attrs, &item.sig.ident);
            self.check_public_signature(&item.sig);
        }
        visit::visit_impl_item_fn(self, item);
    }

    fn visit_item_struct(&mut self, item: &'ast ItemStruct) {
        if item.fields.len() > STRUCT_FIELD_COUNT_MAX {
            self.add_violation(
                Severity::Ratchet,
                item.ident.span(),
                format!(
                    "Struct '{}' has {} fields, exceeding the max of {}.",
                    item.ident,
                    item.fields.len(),
                    STRUCT_FIELD_COUNT_MAX
                ),
            );
        }
        if matches!(item.vis, Visibility::Public(_)) {
            self.check_public_item("struct", &item.attrs, &item.ident);
        }
        visit::visit_item_struct(self, item);
    }

    fn visit_item_enum(&mut self, item: &'ast ItemEnum) {
        if matches!(item.vis, Visibility::Public(_)) {
            self.check_public_item("enum", &item.attrs, &item.ident);
        }
        visit::visit_item_enum(self, item);
    }

    fn visit_item_trait(&mut self, item: &'ast ItemTrait) {
        if matches!(item.vis, Visibility::Public(_)) {
            self.check_public_item("trait", &item.attrs, &item.ident);
        }
        visit::visit_item_trait(self, item);
    }

    fn visit_expr_method_call(&mut self, call: &'ast ExprMethodCall) {
        if call.method == "unwrap" || call.method == "expect" {
            self.add_violation(
                Severity::Critical,
                call.method.span(),
                format!(
                    "Do not use .{}() in production code; return a WlsbError instead.",
                    call.method
                ),
            );
        }
        visit::visit_expr_method_call(self, call);
    }
}

fn has_doc(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident("doc"))
}

/// Matches `#[cfg(test)]` exactly; `cfg(any(test, ...))` items still ship.
fn is_cfg_test(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|attr| {
        attr.path().is_ident("cfg")
            && attr
                .parse_args::<syn::Ident>()
                .is_ok_and(|ident| ident == "test")
    })
}

fn check_for_fixme(path: &Path, text: &str, violations: &mut Vec<TidyViolation>) {
    let marker = concat!("FIX", "ME");
    for (index, line) in text.lines().enumerate() {
        if line.contains(marker) {
            violations.push(TidyViolation::new(
                Severity::Critical,
                path,
                index + 1,
                format!("{} comments are not allowed in the main branch.", marker),
            ));
        }
    }
}

fn list_rust_files() -> Vec<PathBuf> {
    let source_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    walkdir::WalkDir::new(source_root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| {
            entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "rs")
        })
        .map(|entry| entry.path().to_path_buf())
        .collect()
}

#[test]
fn tidy_main() {
    let mut violations = Vec::new();

    for path in &list_rust_files() {
        let file_name = path.file_name().map(|name| name.to_string_lossy().to_string());
        let Some(file_name) = file_name else {
            continue;
        };
        if ANTI_PATTERN_MODULES.contains(&file_name.as_str()) {
            violations.push(TidyViolation::new(
                Severity::Critical,
                path,
                0,
                "Anti-pattern module name; use a focused, descriptive module name.",
            ));
        }
        if file_name == "tidy.rs" {
            continue;
        }

        let text = fs::read_to_string(path).expect("Failed to read source file");
        let line_count = text.lines().count();
        if line_count > MODULE_SIZE_HIGH_WATER_MARK {
            violations.push(TidyViolation::new(
                Severity::Ratchet,
                path,
                0,
                format!(
                    "Module has {} lines, exceeding the high-water mark of {}.",
                    line_count, MODULE_SIZE_HIGH_WATER_MARK
                ),
            ));
        }

        check_for_fixme(path, &text, &mut violations);

        match syn::parse_file(&text) {
            Ok(ast) => {
                let mut visitor = TidyVisitor::new(path);
                visitor.visit_file(&ast);
                violations.extend(visitor.violations);
            }
            Err(err) => violations.push(TidyViolation::new(
                Severity::Critical,
                path,
                err.span().start().line,
                format!("Failed to parse file: {}", err),
            )),
        }
    }

    violations.sort_by_key(|v| (Reverse(v.severity), v.path.clone(), v.line));

    assert!(
        violations.is_empty(),
        "\n--- Tidy Failures ---\n{}\n",
        violations
            .iter()
            .map(|v| format!("[{:?}] {}:{}: {}", v.severity, v.path, v.line, v.message))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

#[test]
fn tidy_flags_unwrap_outside_tests() {
    let source = r#"
        /// Documented.
        pub fn parse(sn: u16) -> u16 { Some(sn).unwrap() }

        #[cfg(test)]
        mod tests {
            fn helper() { Some(1).unwrap(); }
        }
    "#;
    let ast = syn::parse_file(source).expect("fixture parses");
    let path = Path::new("fixture.rs");
    let mut visitor = TidyVisitor::new(path);
    visitor.visit_file(&ast);

    let messages: Vec<_> = visitor.violations.iter().map(|v| v.message.as_str()).collect();
    assert_eq!(messages.len(), 2, "{:?}", messages);
    assert!(messages.iter().any(|m| m.contains("sequence_number")));
    assert!(messages.iter().any(|m| m.contains(".unwrap()")));
}

#[test]
fn tidy_flags_undocumented_public_items() {
    let source = r#"
        pub struct Bare;
        pub enum Kind { A }
        /// Documented.
        pub struct Holder;
        impl Holder {
            pub fn method(&self) {}
            fn private(&self) {}
        }
    "#;
    let ast = syn::parse_file(source).expect("fixture parses");
    let mut visitor = TidyVisitor::new(Path::new("fixture.rs"));
    visitor.visit_file(&ast);
    assert_eq!(visitor.violations.len(), 3);
    assert!(
        visitor
            .violations
            .iter()
            .all(|v| v.severity == Severity::Critical)
    );
}
