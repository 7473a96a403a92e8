//! Unit tests for the lexical extractors

use super::*;

const SAMPLE: &str = r#"
import * as React from "react"
import { Slot } from "@radix-ui/react-slot"
import { cva, type VariantProps } from "class-variance-authority"
import { cn } from "../utils"
import styles from "./button.module.css"
import "$lib/global.css"

export function Button() {
  return <Slot className={cn(styles.root)} />
}
"#;

#[test]
fn dependencies_skip_relative_and_alias_specifiers() {
    let deps = extract_dependencies(SAMPLE);
    let expected: Vec<&str> = vec!["react", "@radix-ui/react-slot", "class-variance-authority"];
    assert_eq!(deps.iter().map(String::as_str).collect::<Vec<_>>(), expected);
}

#[test]
fn dependencies_preserve_first_seen_order() {
    let text = "import { z } from \"zod\"\nimport React from \"react\"\nimport { x } from \"zod\"\n";
    let deps = extract_dependencies(text);
    assert_eq!(deps.iter().map(String::as_str).collect::<Vec<_>>(), vec!["zod", "react"]);
}

#[test]
fn dependencies_include_require_calls() {
    let text = "const path = require(\"path\");\nconst local = require(\"./local\");\n";
    let deps = extract_dependencies(text);
    assert_eq!(deps.iter().map(String::as_str).collect::<Vec<_>>(), vec!["path"]);
}

#[test]
fn extraction_is_idempotent() {
    assert_eq!(extract_dependencies(SAMPLE), extract_dependencies(SAMPLE));
    assert_eq!(extract_imports(SAMPLE), extract_imports(SAMPLE));
}

#[test]
fn imports_cover_default_namespace_and_named_bindings() {
    let names = extract_imports(SAMPLE);
    assert!(names.contains("React"));
    assert!(names.contains("Slot"));
    assert!(names.contains("cva"));
    assert!(names.contains("VariantProps"));
    assert!(names.contains("cn"));
    assert!(names.contains("styles"));
}

#[test]
fn imports_honor_as_renames() {
    let names = extract_imports("import { Button as BaseButton, useMemo } from \"react\"\n");
    assert!(names.contains("BaseButton"));
    assert!(names.contains("useMemo"));
    assert!(!names.contains("Button"));
}

#[test]
fn component_usage_collects_uppercase_bindings_and_tags() {
    let text = r#"
import { Card, CardContent } from "./card"
import { useState } from "react"

export function Demo() {
  return (
    <Card>
      <CardContent>
        <Avatar />
        <span>plain</span>
      </CardContent>
    </Card>
  )
}
"#;
    let used = extract_component_usage(text);
    assert!(used.contains("Card"));
    assert!(used.contains("CardContent"));
    assert!(used.contains("Avatar"));
    assert!(!used.contains("useState"));
    assert!(!used.contains("span"));
}

#[test]
fn leading_description_from_line_comment() {
    let text = "// A simple login form.\nexport function Login() {}\n";
    assert_eq!(
        extract_leading_description(text),
        Some("A simple login form.".to_string())
    );
}

#[test]
fn leading_description_from_block_comment() {
    let text = "/**\n * Dashboard shell with sidebar.\n */\nexport {}\n";
    assert_eq!(
        extract_leading_description(text),
        Some("Dashboard shell with sidebar.".to_string())
    );
}

#[test]
fn leading_description_from_markup_comment() {
    let text = "<!-- Calendar widget -->\n<div />\n";
    assert_eq!(
        extract_leading_description(text),
        Some("Calendar widget".to_string())
    );
}

#[test]
fn no_description_when_code_comes_first() {
    let text = "import React from \"react\"\n// too late\n";
    assert_eq!(extract_leading_description(text), None);
}

#[test]
fn extractors_never_fail_on_garbage() {
    let garbage = "import from from import \"\" <<<>>> {,,} require(";
    let _ = extract_dependencies(garbage);
    let _ = extract_imports(garbage);
    let _ = extract_component_usage(garbage);
    let _ = extract_leading_description(garbage);
}
