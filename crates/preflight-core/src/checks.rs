use crate::finding::Finding;
use crate::manifest::Manifest;
use crate::paths;
use crate::runner::{Check, CheckContext};
use crate::types::{FileKind, Severity};
use regex::Regex;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Check ids
// ---------------------------------------------------------------------------

pub const MANIFEST: &str = "manifest";
pub const XML_WELL_FORMED: &str = "xml-well-formed";
pub const API_VERSION: &str = "api-version";
pub const META_FILES: &str = "meta-files";
pub const NAMING: &str = "naming";
pub const HARDCODED_IDS: &str = "hardcoded-ids";
pub const HARDCODED_URLS: &str = "hardcoded-urls";
pub const DEPRECATED: &str = "deprecated";
pub const TEST_RATIO: &str = "test-ratio";

/// Returns true if the given string names a registered check.
pub fn is_valid_id(id: &str) -> bool {
    default_checks().iter().any(|c| c.id == id)
}

// ---------------------------------------------------------------------------
// Pattern helpers
// ---------------------------------------------------------------------------

static API_VERSION_RE: OnceLock<Regex> = OnceLock::new();
static CLASS_NAME_RE: OnceLock<Regex> = OnceLock::new();
static TEST_CLASS_RE: OnceLock<Regex> = OnceLock::new();
static RECORD_ID_RE: OnceLock<Regex> = OnceLock::new();
static INSTANCE_URL_RE: OnceLock<Regex> = OnceLock::new();
static DEPRECATED_RE: OnceLock<Regex> = OnceLock::new();

fn api_version_re() -> &'static Regex {
    API_VERSION_RE
        .get_or_init(|| Regex::new(r"<apiVersion>\s*([0-9]+(?:\.[0-9]+)?)\s*</apiVersion>").unwrap())
}

fn class_name_re() -> &'static Regex {
    CLASS_NAME_RE.get_or_init(|| Regex::new(r"^[A-Z][A-Za-z0-9_]*$").unwrap())
}

fn test_class_re() -> &'static Regex {
    TEST_CLASS_RE.get_or_init(|| Regex::new(r"(?i)@istest|\btestmethod\b").unwrap())
}

fn record_id_re() -> &'static Regex {
    // Quoted 15- or 18-char record IDs with a known key prefix. The custom
    // object prefix family (aXX…) is included; the quote requirement keeps
    // the false-positive rate near the original grep's.
    RECORD_ID_RE.get_or_init(|| {
        Regex::new(
            r#"["'](?:001|003|005|006|00D|00G|00Q|00T|00e|01p|500|701|800|a[0-9A-Za-z]{2})[0-9A-Za-z]{12}(?:[0-9A-Za-z]{3})?["']"#,
        )
        .unwrap()
    })
}

fn instance_url_re() -> &'static Regex {
    INSTANCE_URL_RE.get_or_init(|| {
        Regex::new(r"(?i)https?://[a-z0-9.-]+\.(?:salesforce|force|visualforce|cloudforce)\.com")
            .unwrap()
    })
}

fn deprecated_re() -> &'static Regex {
    DEPRECATED_RE.get_or_init(|| Regex::new(r"(?i)@deprecated\b").unwrap())
}

fn is_test_class(content: &str) -> bool {
    test_class_re().is_match(content)
}

// ---------------------------------------------------------------------------
// 1. manifest — package.xml presence and well-formedness
// ---------------------------------------------------------------------------

fn check_manifest(ctx: &CheckContext) -> Vec<Finding> {
    let rel = ctx.config.manifest.clone();
    let path = paths::manifest_path(ctx.root, &ctx.config.manifest);
    if !path.exists() {
        return vec![Finding::in_file(
            MANIFEST,
            Severity::Error,
            "package manifest not found",
            rel,
        )];
    }

    let text = match std::fs::read_to_string(&path) {
        Ok(t) => t,
        Err(e) => {
            return vec![Finding::in_file(
                MANIFEST,
                Severity::Error,
                format!("manifest could not be read: {e}"),
                rel,
            )]
        }
    };

    let manifest = match Manifest::parse(&text) {
        Ok(m) => m,
        Err(reason) => {
            return vec![Finding::in_file(
                MANIFEST,
                Severity::Error,
                format!("manifest is not well-formed XML: {reason}"),
                rel,
            )]
        }
    };

    let mut findings = Vec::new();
    if manifest.types.is_empty() {
        findings.push(Finding::in_file(
            MANIFEST,
            Severity::Error,
            "manifest declares no <types>",
            rel.clone(),
        ));
    }
    for entry in &manifest.types {
        match &entry.name {
            None => findings.push(Finding::in_file(
                MANIFEST,
                Severity::Error,
                "a <types> block is missing its <name>",
                rel.clone(),
            )),
            Some(name) if entry.members.is_empty() => findings.push(Finding::in_file(
                MANIFEST,
                Severity::Error,
                format!("<types> '{name}' has no <members>"),
                rel.clone(),
            )),
            Some(_) => {}
        }
    }
    if manifest.version.is_none() {
        findings.push(Finding::in_file(
            MANIFEST,
            Severity::Error,
            "manifest is missing <version>",
            rel,
        ));
    }
    findings
}

// ---------------------------------------------------------------------------
// 2. xml-well-formed — every XML descriptor must parse
// ---------------------------------------------------------------------------

fn check_xml_well_formed(ctx: &CheckContext) -> Vec<Finding> {
    // The manifest path is excluded so a broken manifest is reported once,
    // by the manifest check.
    let manifest_path: PathBuf = paths::manifest_path(ctx.root, &ctx.config.manifest);

    let mut findings = Vec::new();
    for file in ctx.scan.xml_files() {
        if file.path == manifest_path {
            continue;
        }
        let Some(content) = &file.content else {
            continue;
        };
        if let Err(e) = roxmltree::Document::parse(content) {
            findings.push(Finding::at_line(
                XML_WELL_FORMED,
                Severity::Error,
                format!("not well-formed XML: {e}"),
                file.rel.clone(),
                e.pos().row as usize,
            ));
        }
    }
    findings
}

// ---------------------------------------------------------------------------
// 3. api-version — descriptor <apiVersion> must meet the floor
// ---------------------------------------------------------------------------

fn check_api_version(ctx: &CheckContext) -> Vec<Finding> {
    let floor = ctx.config.api_version_floor;
    let mut findings = Vec::new();

    for file in ctx.scan.of_kind(FileKind::MetaXml) {
        let Some(content) = &file.content else {
            continue;
        };
        for (idx, line) in content.lines().enumerate() {
            if let Some(cap) = api_version_re().captures(line) {
                if let Ok(version) = cap[1].parse::<f64>() {
                    if version < floor {
                        findings.push(Finding::at_line(
                            API_VERSION,
                            Severity::Warning,
                            format!("apiVersion {version} is below the floor {floor}"),
                            file.rel.clone(),
                            idx + 1,
                        ));
                    }
                }
            }
        }
    }
    findings
}

// ---------------------------------------------------------------------------
// 4. meta-files — every Apex source needs its -meta.xml companion
// ---------------------------------------------------------------------------

fn check_meta_files(ctx: &CheckContext) -> Vec<Finding> {
    let present: HashSet<&std::path::Path> =
        ctx.scan.files.iter().map(|f| f.path.as_path()).collect();

    let mut findings = Vec::new();
    for file in ctx.scan.apex_sources() {
        let Some(expected) = paths::expected_meta_path(&file.path) else {
            continue;
        };
        if !present.contains(expected.as_path()) {
            findings.push(Finding::in_file(
                META_FILES,
                Severity::Error,
                format!("missing companion {}-meta.xml", file.file_name()),
                file.rel.clone(),
            ));
        }
    }
    findings
}

// ---------------------------------------------------------------------------
// 5. naming — class/trigger/test-class conventions
// ---------------------------------------------------------------------------

fn check_naming(ctx: &CheckContext) -> Vec<Finding> {
    let mut findings = Vec::new();

    for file in ctx.scan.of_kind(FileKind::ApexClass) {
        let name = file.base_name();
        if !class_name_re().is_match(name) {
            findings.push(Finding::in_file(
                NAMING,
                Severity::Warning,
                format!("class name '{name}' is not PascalCase"),
                file.rel.clone(),
            ));
        }
        if let Some(content) = &file.content {
            if is_test_class(content) && !(name.ends_with("Test") || name.ends_with("Tests")) {
                findings.push(Finding::in_file(
                    NAMING,
                    Severity::Warning,
                    format!("test class '{name}' should end in 'Test'"),
                    file.rel.clone(),
                ));
            }
        }
    }

    for file in ctx.scan.of_kind(FileKind::ApexTrigger) {
        let name = file.base_name();
        if !name.ends_with("Trigger") {
            findings.push(Finding::in_file(
                NAMING,
                Severity::Warning,
                format!("trigger name '{name}' should end in 'Trigger'"),
                file.rel.clone(),
            ));
        }
    }

    findings
}

// ---------------------------------------------------------------------------
// 6. hardcoded-ids — quoted record IDs in Apex source
// ---------------------------------------------------------------------------

fn check_hardcoded_ids(ctx: &CheckContext) -> Vec<Finding> {
    grep_apex_sources(ctx, record_id_re(), |matched| {
        format!("hardcoded record ID {matched}")
    })
    .into_iter()
    .map(|(rel, line, message)| {
        Finding::at_line(HARDCODED_IDS, Severity::Error, message, rel, line)
    })
    .collect()
}

// ---------------------------------------------------------------------------
// 7. hardcoded-urls — instance URLs in Apex source
// ---------------------------------------------------------------------------

fn check_hardcoded_urls(ctx: &CheckContext) -> Vec<Finding> {
    grep_apex_sources(ctx, instance_url_re(), |matched| {
        format!("hardcoded instance URL {matched}")
    })
    .into_iter()
    .map(|(rel, line, message)| {
        Finding::at_line(HARDCODED_URLS, Severity::Warning, message, rel, line)
    })
    .collect()
}

/// Line-oriented grep over Apex sources. Returns (rel path, 1-based line,
/// message) per match, one per line.
fn grep_apex_sources(
    ctx: &CheckContext,
    re: &Regex,
    describe: impl Fn(&str) -> String,
) -> Vec<(String, usize, String)> {
    let mut hits = Vec::new();
    for file in ctx.scan.apex_sources() {
        let Some(content) = &file.content else {
            continue;
        };
        for (idx, line) in content.lines().enumerate() {
            if let Some(m) = re.find(line) {
                hits.push((file.rel.clone(), idx + 1, describe(m.as_str())));
            }
        }
    }
    hits
}

// ---------------------------------------------------------------------------
// 8. deprecated — deprecated component count
// ---------------------------------------------------------------------------

fn check_deprecated(ctx: &CheckContext) -> Vec<Finding> {
    let mut findings = Vec::new();

    for file in ctx.scan.apex_sources() {
        let Some(content) = &file.content else {
            continue;
        };
        for (idx, line) in content.lines().enumerate() {
            if deprecated_re().is_match(line) {
                findings.push(Finding::at_line(
                    DEPRECATED,
                    Severity::Warning,
                    "deprecated Apex member",
                    file.rel.clone(),
                    idx + 1,
                ));
            }
        }
    }

    for file in ctx.scan.of_kind(FileKind::MetaXml) {
        let Some(content) = &file.content else {
            continue;
        };
        if content.contains("<status>Deprecated</status>") {
            findings.push(Finding::in_file(
                DEPRECATED,
                Severity::Warning,
                "component status is Deprecated",
                file.rel.clone(),
            ));
        }
    }

    findings
}

// ---------------------------------------------------------------------------
// 9. test-ratio — test classes per non-test class
// ---------------------------------------------------------------------------

fn check_test_ratio(ctx: &CheckContext) -> Vec<Finding> {
    let mut test = 0usize;
    let mut non_test = 0usize;
    for file in ctx.scan.of_kind(FileKind::ApexClass) {
        match &file.content {
            Some(content) if is_test_class(content) => test += 1,
            Some(_) => non_test += 1,
            None => {}
        }
    }

    // Nothing to cover, nothing to flag.
    if non_test == 0 {
        return Vec::new();
    }

    let ratio = test as f64 / non_test as f64;
    let min = ctx.config.min_test_ratio;
    if ratio < min {
        return vec![Finding::new(
            TEST_RATIO,
            Severity::Warning,
            format!(
                "test class ratio {ratio:.2} ({test} test / {non_test} non-test) is below the minimum {min:.2}"
            ),
        )];
    }
    Vec::new()
}

// ---------------------------------------------------------------------------
// Default registry (fixed order)
// ---------------------------------------------------------------------------

pub fn default_checks() -> Vec<Check> {
    vec![
        Check {
            id: MANIFEST,
            description: "package manifest exists and is well-formed",
            default_severity: Severity::Error,
            run: check_manifest,
        },
        Check {
            id: XML_WELL_FORMED,
            description: "every XML descriptor parses",
            default_severity: Severity::Error,
            run: check_xml_well_formed,
        },
        Check {
            id: API_VERSION,
            description: "descriptor apiVersion meets the configured floor",
            default_severity: Severity::Warning,
            run: check_api_version,
        },
        Check {
            id: META_FILES,
            description: "every Apex source has its -meta.xml companion",
            default_severity: Severity::Error,
            run: check_meta_files,
        },
        Check {
            id: NAMING,
            description: "class, trigger, and test-class naming conventions",
            default_severity: Severity::Warning,
            run: check_naming,
        },
        Check {
            id: HARDCODED_IDS,
            description: "no hardcoded record IDs in Apex source",
            default_severity: Severity::Error,
            run: check_hardcoded_ids,
        },
        Check {
            id: HARDCODED_URLS,
            description: "no hardcoded instance URLs in Apex source",
            default_severity: Severity::Warning,
            run: check_hardcoded_urls,
        },
        Check {
            id: DEPRECATED,
            description: "count of deprecated components and Apex members",
            default_severity: Severity::Warning,
            run: check_deprecated,
        },
        Check {
            id: TEST_RATIO,
            description: "test classes per non-test class meets the minimum",
            default_severity: Severity::Warning,
            run: check_test_ratio,
        },
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::runner::Runner;
    use crate::scan::MetadataScan;
    use std::path::Path;
    use tempfile::TempDir;

    const META_OK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ApexClass xmlns="http://soap.sforce.com/2006/04/metadata">
    <apiVersion>58.0</apiVersion>
    <status>Active</status>
</ApexClass>
"#;

    const PACKAGE_OK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Package xmlns="http://soap.sforce.com/2006/04/metadata">
    <types>
        <members>AccountHandler</members>
        <name>ApexClass</name>
    </types>
    <version>58.0</version>
</Package>
"#;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn write_class(root: &Path, name: &str, body: &str) {
        let rel = format!("force-app/main/default/classes/{name}.cls");
        write(root, &rel, body);
        let meta = format!("force-app/main/default/classes/{name}.cls-meta.xml");
        write(root, &meta, META_OK);
    }

    fn run_check(dir: &TempDir, config: &Config, id: &str) -> Vec<Finding> {
        let scan = MetadataScan::scan(dir.path(), config).unwrap();
        let ctx = CheckContext {
            scan: &scan,
            config,
            root: dir.path(),
        };
        let check = default_checks()
            .into_iter()
            .find(|c| c.id == id)
            .expect("registered check");
        (check.run)(&ctx)
    }

    fn fixture(dir: &TempDir) -> Config {
        write(dir.path(), "manifest/package.xml", PACKAGE_OK);
        std::fs::create_dir_all(dir.path().join("force-app")).unwrap();
        Config::new("test")
    }

    #[test]
    fn registry_ids_are_unique_and_valid() {
        let checks = default_checks();
        let mut seen = HashSet::new();
        for c in &checks {
            assert!(seen.insert(c.id), "duplicate check id {}", c.id);
            assert!(is_valid_id(c.id));
        }
        assert_eq!(checks.len(), 9);
        assert!(!is_valid_id("bogus"));
    }

    #[test]
    fn registry_order_is_fixed() {
        let ids: Vec<&str> = default_checks().iter().map(|c| c.id).collect();
        assert_eq!(
            ids,
            vec![
                MANIFEST,
                XML_WELL_FORMED,
                API_VERSION,
                META_FILES,
                NAMING,
                HARDCODED_IDS,
                HARDCODED_URLS,
                DEPRECATED,
                TEST_RATIO,
            ]
        );
    }

    // -- manifest ----------------------------------------------------------

    #[test]
    fn manifest_missing_is_error() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("force-app")).unwrap();
        let config = Config::new("test");
        let findings = run_check(&dir, &config, MANIFEST);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("not found"));
    }

    #[test]
    fn manifest_well_formed_passes() {
        let dir = TempDir::new().unwrap();
        let config = fixture(&dir);
        assert!(run_check(&dir, &config, MANIFEST).is_empty());
    }

    #[test]
    fn manifest_broken_xml_is_one_finding() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("force-app")).unwrap();
        write(dir.path(), "manifest/package.xml", "<Package><types></Package>");
        let config = Config::new("test");
        let findings = run_check(&dir, &config, MANIFEST);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("not well-formed"));
    }

    #[test]
    fn manifest_gaps_reported_individually() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("force-app")).unwrap();
        write(
            dir.path(),
            "manifest/package.xml",
            "<Package><types><members>Foo</members></types>\
             <types><name>ApexTrigger</name></types></Package>",
        );
        let config = Config::new("test");
        let findings = run_check(&dir, &config, MANIFEST);
        let messages: Vec<&str> = findings.iter().map(|f| f.message.as_str()).collect();
        assert!(messages.iter().any(|m| m.contains("missing its <name>")));
        assert!(messages.iter().any(|m| m.contains("has no <members>")));
        assert!(messages.iter().any(|m| m.contains("missing <version>")));
    }

    // -- xml-well-formed ---------------------------------------------------

    #[test]
    fn broken_descriptor_xml_is_flagged() {
        let dir = TempDir::new().unwrap();
        let config = fixture(&dir);
        write(
            dir.path(),
            "force-app/main/default/objects/Broken.object-meta.xml",
            "<CustomObject><fields></CustomObject>",
        );
        let findings = run_check(&dir, &config, XML_WELL_FORMED);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].file.as_deref().unwrap().contains("Broken"));
    }

    #[test]
    fn manifest_excluded_from_xml_sweep() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("force-app")).unwrap();
        // Manifest lives inside the scanned tree and is broken: the sweep
        // must leave it to the manifest check.
        let mut config = Config::new("test");
        config.manifest = "force-app/package.xml".to_string();
        write(dir.path(), "force-app/package.xml", "<Package><oops></Package>");
        let findings = run_check(&dir, &config, XML_WELL_FORMED);
        assert!(findings.is_empty());
    }

    // -- api-version -------------------------------------------------------

    #[test]
    fn api_version_below_floor_warns() {
        let dir = TempDir::new().unwrap();
        let config = fixture(&dir);
        write(
            dir.path(),
            "force-app/main/default/classes/Old.cls",
            "public class Old {}",
        );
        write(
            dir.path(),
            "force-app/main/default/classes/Old.cls-meta.xml",
            "<ApexClass><apiVersion>45.0</apiVersion></ApexClass>",
        );
        let findings = run_check(&dir, &config, API_VERSION);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("45"));
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[test]
    fn api_version_at_floor_passes() {
        let dir = TempDir::new().unwrap();
        let config = fixture(&dir);
        write_class(dir.path(), "Current", "public class Current {}");
        assert!(run_check(&dir, &config, API_VERSION).is_empty());
    }

    // -- meta-files --------------------------------------------------------

    #[test]
    fn missing_meta_companion_is_error() {
        let dir = TempDir::new().unwrap();
        let config = fixture(&dir);
        write(
            dir.path(),
            "force-app/main/default/classes/NoMeta.cls",
            "public class NoMeta {}",
        );
        let findings = run_check(&dir, &config, META_FILES);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("NoMeta.cls-meta.xml"));
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn present_meta_companion_passes() {
        let dir = TempDir::new().unwrap();
        let config = fixture(&dir);
        write_class(dir.path(), "HasMeta", "public class HasMeta {}");
        assert!(run_check(&dir, &config, META_FILES).is_empty());
    }

    // -- naming ------------------------------------------------------------

    #[test]
    fn lowercase_class_name_warns() {
        let dir = TempDir::new().unwrap();
        let config = fixture(&dir);
        write_class(dir.path(), "accountHandler", "public class accountHandler {}");
        let findings = run_check(&dir, &config, NAMING);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("not PascalCase"));
    }

    #[test]
    fn trigger_without_suffix_warns() {
        let dir = TempDir::new().unwrap();
        let config = fixture(&dir);
        write(
            dir.path(),
            "force-app/main/default/triggers/Account.trigger",
            "trigger Account on Account (before insert) {}",
        );
        let findings = run_check(&dir, &config, NAMING);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("end in 'Trigger'"));
    }

    #[test]
    fn test_class_without_suffix_warns() {
        let dir = TempDir::new().unwrap();
        let config = fixture(&dir);
        write_class(
            dir.path(),
            "AccountChecks",
            "@isTest\nprivate class AccountChecks {}",
        );
        let findings = run_check(&dir, &config, NAMING);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("should end in 'Test'"));
    }

    #[test]
    fn conventional_names_pass() {
        let dir = TempDir::new().unwrap();
        let config = fixture(&dir);
        write_class(dir.path(), "AccountHandler", "public class AccountHandler {}");
        write_class(
            dir.path(),
            "AccountHandlerTest",
            "@isTest\nprivate class AccountHandlerTest {}",
        );
        write(
            dir.path(),
            "force-app/main/default/triggers/AccountTrigger.trigger",
            "trigger AccountTrigger on Account (before insert) {}",
        );
        write(
            dir.path(),
            "force-app/main/default/triggers/AccountTrigger.trigger-meta.xml",
            META_OK,
        );
        assert!(run_check(&dir, &config, NAMING).is_empty());
    }

    // -- hardcoded-ids / hardcoded-urls ------------------------------------

    #[test]
    fn quoted_record_id_is_error() {
        let dir = TempDir::new().unwrap();
        let config = fixture(&dir);
        write_class(
            dir.path(),
            "Assigner",
            "public class Assigner {\n    Id queue = '00G4x000003XyZAEA0';\n}",
        );
        let findings = run_check(&dir, &config, HARDCODED_IDS);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, Some(2));
        assert_eq!(findings[0].severity, Severity::Error);
        assert!(findings[0].message.contains("00G4x000003XyZAEA0"));
    }

    #[test]
    fn fifteen_char_id_matches_too() {
        let dir = TempDir::new().unwrap();
        let config = fixture(&dir);
        write_class(
            dir.path(),
            "Lookup",
            "public class Lookup { String acct = '0014x000003XyZA'; }",
        );
        assert_eq!(run_check(&dir, &config, HARDCODED_IDS).len(), 1);
    }

    #[test]
    fn ordinary_strings_are_not_ids() {
        let dir = TempDir::new().unwrap();
        let config = fixture(&dir);
        write_class(
            dir.path(),
            "Labels",
            "public class Labels { String s = 'Closed Won'; String t = 'a short one'; }",
        );
        assert!(run_check(&dir, &config, HARDCODED_IDS).is_empty());
    }

    #[test]
    fn instance_url_warns() {
        let dir = TempDir::new().unwrap();
        let config = fixture(&dir);
        write_class(
            dir.path(),
            "Callout",
            "public class Callout {\n    String base = 'https://na1.salesforce.com/services';\n}",
        );
        let findings = run_check(&dir, &config, HARDCODED_URLS);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!(findings[0].line, Some(2));
    }

    // -- deprecated --------------------------------------------------------

    #[test]
    fn deprecated_annotation_and_status_counted() {
        let dir = TempDir::new().unwrap();
        let config = fixture(&dir);
        write_class(
            dir.path(),
            "Legacy",
            "public class Legacy {\n    @Deprecated\n    public void oldPath() {}\n}",
        );
        write(
            dir.path(),
            "force-app/main/default/classes/Gone.cls",
            "public class Gone {}",
        );
        write(
            dir.path(),
            "force-app/main/default/classes/Gone.cls-meta.xml",
            "<ApexClass><status>Deprecated</status></ApexClass>",
        );
        let findings = run_check(&dir, &config, DEPRECATED);
        assert_eq!(findings.len(), 2);
    }

    // -- test-ratio --------------------------------------------------------

    #[test]
    fn low_test_ratio_warns_once() {
        let dir = TempDir::new().unwrap();
        let config = fixture(&dir);
        write_class(dir.path(), "A", "public class A {}");
        write_class(dir.path(), "B", "public class B {}");
        write_class(dir.path(), "C", "public class C {}");
        write_class(dir.path(), "ATest", "@isTest\nprivate class ATest {}");
        // 1 test / 3 non-test = 0.33 < 0.5
        let findings = run_check(&dir, &config, TEST_RATIO);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("0.33"));
        assert!(findings[0].file.is_none());
    }

    #[test]
    fn healthy_test_ratio_passes() {
        let dir = TempDir::new().unwrap();
        let config = fixture(&dir);
        write_class(dir.path(), "A", "public class A {}");
        write_class(dir.path(), "ATest", "@isTest\nprivate class ATest {}");
        assert!(run_check(&dir, &config, TEST_RATIO).is_empty());
    }

    #[test]
    fn all_test_classes_is_fine() {
        let dir = TempDir::new().unwrap();
        let config = fixture(&dir);
        write_class(dir.path(), "OnlyTest", "@isTest\nprivate class OnlyTest {}");
        assert!(run_check(&dir, &config, TEST_RATIO).is_empty());
    }

    // -- full pass ---------------------------------------------------------

    #[test]
    fn clean_tree_yields_clean_report() {
        let dir = TempDir::new().unwrap();
        let config = fixture(&dir);
        write_class(dir.path(), "AccountHandler", "public class AccountHandler {}");
        write_class(
            dir.path(),
            "AccountHandlerTest",
            "@isTest\nprivate class AccountHandlerTest {}",
        );

        let scan = MetadataScan::scan(dir.path(), &config).unwrap();
        let ctx = CheckContext {
            scan: &scan,
            config: &config,
            root: dir.path(),
        };
        let report = Runner::new(default_checks()).run(&ctx);
        assert_eq!(report.checks_run, 9);
        assert!(report.findings.is_empty(), "{:?}", report.findings);
        assert_eq!(report.exit_code(), 0);
    }
}
