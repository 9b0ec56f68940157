//! Property tests for build document ordering.

use proptest::prelude::*;

use cmakegen::{classify, render, Config, FileSet};

fn cpp_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z_][a-z0-9_]{0,10}")
        .unwrap()
        .prop_map(|stem| format!("{}.cpp", stem))
}

fn name_set() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::btree_set(cpp_name(), 0..=8).prop_map(|set| set.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: preamble first, tests in sorted order, main block last.
    #[test]
    fn property_document_order(
        mut src in name_set(),
        tests in name_set(),
        with_main in any::<bool>(),
    ) {
        if with_main && !src.iter().any(|n| n == "main.cpp") {
            src.push("main.cpp".to_string());
        }
        let has_main = src.iter().any(|n| n == "main.cpp");

        let src_files = FileSet::from_names(src.iter().rev().cloned());
        let test_files = FileSet::from_names(tests.iter().rev().cloned());
        let classification = classify("src", &src_files, "main.cpp");
        let doc = render(&Config::default(), &test_files, &classification);
        let lines = doc.lines();

        prop_assert_eq!(&lines[6], "enable_testing()");

        let executables: Vec<&String> = lines
            .iter()
            .filter(|l| l.starts_with("add_executable("))
            .collect();
        prop_assert_eq!(executables.len(), tests.len() + usize::from(has_main));

        let mut sorted_tests = tests.clone();
        sorted_tests.sort();
        for (line, test) in executables.iter().zip(&sorted_tests) {
            let prefix = format!("add_executable({} tests/{}", test.trim_end_matches(".cpp"), test);
            prop_assert!(line.starts_with(&prefix), "{} does not start with {}", line, prefix);
        }

        if has_main {
            prop_assert!(executables
                .last()
                .unwrap()
                .starts_with("add_executable(main src/main.cpp"));
            prop_assert_eq!(lines.last().map(String::as_str), Some(""));
        }

        for line in &executables {
            for common in &classification.common_sources {
                prop_assert!(line.contains(common.as_str()));
            }
        }
        for line in &executables[..tests.len()] {
            prop_assert!(!line.contains(" src/main.cpp"));
        }
    }

    /// PROPERTY: rendering is deterministic regardless of listing order.
    #[test]
    fn property_render_ignores_input_order(names in name_set()) {
        let forward = FileSet::from_names(names.iter().cloned());
        let backward = FileSet::from_names(names.iter().rev().cloned());

        let a = render(&Config::default(), &forward, &classify("src", &forward, "main.cpp"));
        let b = render(&Config::default(), &backward, &classify("src", &backward, "main.cpp"));

        prop_assert_eq!(a.render(), b.render());
    }
}
