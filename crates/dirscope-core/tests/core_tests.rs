use dirscope_core::{
    EntryContext, EntryFact, Node, NodeKind, Pattern, PatternSet, ScanConfig, StatsAccumulator,
    is_ignored, matches,
};

const NAMES: &[&str] = &[
    "a.txt",
    "app.log",
    "build",
    "Build",
    "node_modules",
    "test_unit.py",
    "unit_test.py",
    ".hidden",
    "",
    "x",
];

#[test]
fn test_literal_pattern_matches_only_equal_names() {
    for pattern_text in NAMES.iter().filter(|n| !n.is_empty()) {
        let pattern = Pattern::parse(pattern_text).unwrap();
        assert!(!pattern.has_wildcard());
        for name in NAMES {
            for is_dir in [false, true] {
                assert_eq!(
                    matches(&pattern, name, is_dir),
                    pattern.text() == *name,
                    "pattern {pattern_text:?} vs {name:?}"
                );
            }
        }
    }
}

#[test]
fn test_directory_only_pattern_never_matches_files() {
    let pattern = Pattern::parse("build/").unwrap();
    for name in NAMES {
        assert!(!matches(&pattern, name, false));
    }
    assert!(matches(&pattern, "build", true));
}

#[test]
fn test_glob_scenario() {
    let pattern = Pattern::parse("test_*.py").unwrap();
    assert!(matches(&pattern, "test_unit.py", false));
    assert!(!matches(&pattern, "unit_test.py", false));
}

#[test]
fn test_pattern_set_from_ignore_text() {
    let content = "\
# Python
__pycache__/
*.pyc

# Build output
/dist
build/
";
    let set = PatternSet::parse(content);
    assert_eq!(set.len(), 4);

    assert!(is_ignored(&set, &EntryContext::new("pkg/__pycache__", true)));
    assert!(is_ignored(&set, &EntryContext::new("pkg/mod.pyc", false)));
    assert!(is_ignored(&set, &EntryContext::new("dist", true)));
    assert!(!is_ignored(&set, &EntryContext::new("web/dist", true)));
    assert!(is_ignored(&set, &EntryContext::new("web/build", true)));
    assert!(!is_ignored(&set, &EntryContext::new("build", false)));
}

#[test]
fn test_read_from_missing_file_is_config_error() {
    let err = PatternSet::read_from(std::path::Path::new("/definitely/not/here/.dirignore"))
        .unwrap_err();
    assert!(err.to_string().contains(".dirignore"));
}

#[test]
fn test_node_json_shape() {
    let mut sub = Node::new_directory("sub", "sub");
    sub.push_child(Node::new_file("b.bin", "sub/b.bin", 100));
    let mut locked = Node::new_directory("locked", "locked");
    locked.set_error("Permission denied");

    let mut root = Node::root("project");
    root.push_child(Node::new_file("a.txt", "a.txt", 10));
    root.push_child(sub);
    root.push_child(locked);

    let value = serde_json::to_value(&root).unwrap();
    assert_eq!(value["name"], "project");
    assert_eq!(value["type"], "directory");
    assert_eq!(value["path"], ".");
    assert!(value.get("size").is_none());
    assert!(value.get("error").is_none());

    let children = value["children"].as_array().unwrap();
    assert_eq!(children.len(), 3);
    assert_eq!(children[0]["type"], "file");
    assert_eq!(children[0]["size"], 10);
    assert!(children[0].get("children").is_none());
    assert_eq!(children[1]["children"][0]["path"], "sub/b.bin");
    assert_eq!(children[2]["error"], "Permission denied");

    let back: Node = serde_json::from_value(value).unwrap();
    assert_eq!(back, root);
}

#[test]
fn test_node_kind_discrimination() {
    let file = Node::new_file("f", "f", 1);
    assert!(matches!(file.kind, NodeKind::File { size: 1 }));

    let dir = Node::new_directory("d", "d");
    assert!(matches!(dir.kind, NodeKind::Directory { ref children, .. } if children.is_empty()));
}

#[test]
fn test_stats_consistent_with_facts() {
    let facts = vec![
        EntryFact::file("a.txt", 10, 0),
        EntryFact::file("src/lib.rs", 300, 1),
        EntryFact::file("src/deep/x.rs", 7, 2),
        EntryFact::directory("src/deep", 1),
        EntryFact::directory("src", 0),
    ];

    let mut acc = StatsAccumulator::new(2);
    for fact in &facts {
        acc.observe(fact);
    }
    let stats = acc.snapshot();

    let file_sum: u64 = facts.iter().map(|f| f.size_bytes).sum();
    assert_eq!(stats.total_size_bytes, file_sum);
    assert_eq!(stats.max_depth, facts.iter().map(|f| f.depth).max().unwrap());
    assert_eq!(stats.total_files + stats.total_directories, facts.len() as u64);
    assert_eq!(stats.by_extension["rs"].file_count, 2);
    assert_eq!(stats.by_extension["rs"].byte_total, 307);
    assert_eq!(stats.largest_files.len(), 2);
    assert_eq!(stats.largest_files[0].path, "src/lib.rs");
    assert_eq!(stats.largest_files[1].path, "a.txt");
}

#[test]
fn test_default_config_has_no_patterns() {
    let config = ScanConfig::default();
    assert!(config.patterns.is_empty());
    assert!(!config.should_ignore(&EntryContext::new("anything", true)));
}
