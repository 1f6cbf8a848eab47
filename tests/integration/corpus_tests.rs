//! Integration tests for usage counting
//!
//! Every declaration of a corpus file is reported with its exact use count,
//! as `file:line:col: name is used N times`.

mod fixtures;

use usecount::config::ReportConfig;
use usecount::graph::EdgeKind;
use usecount::model::OccurrenceKind;
use usecount::{Checker, Config, LintAdapter, Program, ReportFormat, Reporter, SortOrder};

/// Lint lines for a program, ordered by location
fn lint(program: &Program, config: &Config) -> Vec<String> {
    let checker = Checker::new(config);
    let analysis = checker.run(program).expect("analysis failed");
    let problems = LintAdapter::new(checker.mask()).problems(&analysis.usages);

    let reporter = Reporter::new(
        ReportConfig {
            format: ReportFormat::Lint,
            sort: SortOrder::Location,
            ..ReportConfig::default()
        },
        Vec::new(),
    );
    let mut out = Vec::new();
    reporter.report(problems, &mut out).expect("report failed");
    String::from_utf8(out)
        .expect("lint output is UTF-8")
        .lines()
        .map(str::to_string)
        .collect()
}

fn assert_lines(actual: Vec<String>, expected: &[&str]) {
    let expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
    assert_eq!(actual, expected, "\nactual:\n{}\n", actual.join("\n"));
}

#[test]
fn test_blank_identifiers() {
    let lines = lint(&fixtures::blank(), &Config::default());
    assert_lines(
        lines,
        &[
            "blank.go:3:8: _ is used 1 time",
            "blank.go:5:6: t1 is used 0 times",
            "blank.go:6:6: t2 is used 2 times",
            "blank.go:7:6: t3 is used 2 times",
            "blank.go:11:6: fn1 is used 0 times",
            "blank.go:16:6: fn2 is used 2 times",
            "blank.go:20:6: init is used 2 times",
        ],
    );
}

#[test]
fn test_functions_and_local_declarations() {
    let lines = lint(&fixtures::functions(), &Config::default());
    assert_lines(
        lines,
        &[
            "functions.go:3:6: state is used 1 time",
            "functions.go:5:6: a is used 3 times",
            "functions.go:9:6: main is used 2 times",
            "functions.go:10:2: st is used 1 time",
            "functions.go:14:6: t1 is used 0 times",
            "functions.go:15:6: t2 is used 1 time",
            "functions.go:16:6: t3 is used 1 time",
            "functions.go:18:6: fn1 is used 0 times",
            "functions.go:19:6: fn2 is used 2 times",
            "functions.go:19:13: x is used 1 time",
            "functions.go:21:6: fn3 is used 2 times",
            "functions.go:23:6: fn4 is used 2 times",
            "functions.go:24:8: x is used 1 time",
            "functions.go:25:8: y is used 0 times",
            "functions.go:26:7: foo is used 0 times",
            "functions.go:27:7: bar is used 2 times",
            "functions.go:33:6: init is used 2 times",
        ],
    );
}

#[test]
fn test_dead_function_keeps_everything_it_references_dead() {
    let lines = lint(&fixtures::nested(), &Config::default());
    assert_lines(
        lines,
        &[
            "nested.go:3:6: t is used 0 times",
            "nested.go:5:10: fragment is used 0 times",
            "nested.go:7:6: fn is used 0 times",
            "nested.go:8:6: v is used 0 times",
            "nested.go:12:3: fragment is used 0 times",
        ],
    );
}

#[test]
fn test_interface_call_reaches_implementer() {
    let config = Config::default();
    let analysis = Checker::new(&config).run(&fixtures::dispatch()).unwrap();

    // Abstract method first, concrete method second (declaration order)
    assert_eq!(analysis.counts("Speak"), vec![1, 1]);
    assert_eq!(analysis.counts("speaker"), vec![2]);
    assert_eq!(analysis.counts("dog"), vec![3]);
    assert_eq!(analysis.counts("s"), vec![1]);
    assert_eq!(analysis.counts("main"), vec![2]);
    assert!(analysis.usages.iter().all(|u| u.live));
}

#[test]
fn test_struct_members_and_type_switch() {
    let lines = lint(&fixtures::members(), &Config::default());
    assert_lines(
        lines,
        &[
            "members.go:3:6: base is used 2 times",
            "members.go:4:2: id is used 1 time",
            "members.go:7:13: Describe is used 1 time",
            "members.go:9:6: item is used 2 times",
            "members.go:10:2: base is used 2 times",
            "members.go:11:2: label is used 1 time",
            "members.go:14:6: shape is used 1 time",
            "members.go:15:6: circle is used 3 times",
            "members.go:16:6: square is used 0 times",
            "members.go:18:6: kind is used 2 times",
            "members.go:18:11: s is used 1 time",
            "members.go:26:6: main is used 2 times",
            "members.go:27:2: it is used 3 times",
            "members.go:33:6: stale is used 0 times",
            "members.go:33:12: it is used 0 times",
        ],
    );
}

#[test]
fn test_member_edges_keep_their_occurrence_kind() {
    let config = Config::default();
    let analysis = Checker::new(&config).run(&fixtures::members()).unwrap();
    let graph = &analysis.graph;
    let kinds_into = |name: &str, index: usize| -> Vec<EdgeKind> {
        let symbol = graph.find_by_name(name).nth(index).unwrap().id;
        graph.references_to(symbol).map(|(_, edge)| edge.kind).collect()
    };

    assert_eq!(
        kinds_into("circle", 0),
        vec![
            EdgeKind::Occurrence(OccurrenceKind::TypeSwitchCase),
            EdgeKind::Occurrence(OccurrenceKind::Identifier),
            EdgeKind::Occurrence(OccurrenceKind::CompositeType),
        ]
    );
    // The embedded field, not the type it embeds
    assert_eq!(
        kinds_into("base", 1),
        vec![EdgeKind::Occurrence(OccurrenceKind::EmbeddedField); 2]
    );
    // Read by selector from main and from the dead stale
    assert_eq!(kinds_into("label", 0).len(), 2);
    assert_eq!(analysis.counts("label"), vec![1]);
    assert!(!analysis.usage("stale").unwrap().live);
}

#[test]
fn test_library_without_roots_is_dead() {
    let config = Config::default();
    let analysis = Checker::new(&config).run(&fixtures::library()).unwrap();

    assert_eq!(analysis.counts("Config"), vec![0]);
    assert_eq!(analysis.counts("Load"), vec![0]);
    assert_eq!(analysis.counts("c"), vec![0]);
    assert_eq!(analysis.counts("helper"), vec![0]);
    // Fields of a type handed to encoding/json stay alive
    assert_eq!(analysis.counts("Name"), vec![1]);
    assert_eq!(analysis.counts("size"), vec![1]);
}

#[test]
fn test_library_exported_surface() {
    let mut config = Config::default();
    config.analysis.whole_program = true;
    let lines = lint(&fixtures::library(), &config);
    assert_lines(
        lines,
        &[
            "lib.go:3:6: Config is used 4 times",
            "lib.go:4:2: Name is used 2 times",
            "lib.go:5:2: size is used 1 time",
            "lib.go:8:6: Load is used 1 time",
            "lib.go:9:6: c is used 2 times",
            "lib.go:14:6: helper is used 0 times",
        ],
    );
}

#[test]
fn test_reflection_disabled() {
    let mut config = Config::default();
    config.analysis.consider_reflection = false;
    let analysis = Checker::new(&config).run(&fixtures::library()).unwrap();

    assert_eq!(analysis.counts("Name"), vec![0]);
    assert_eq!(analysis.counts("size"), vec![0]);
    assert!(!analysis.usage("size").unwrap().live);
}

#[test]
fn test_unlisted_routine_is_not_reflective() {
    let mut config = Config::default();
    config.reflection.routines.clear();
    let analysis = Checker::new(&config).run(&fixtures::library()).unwrap();

    assert_eq!(analysis.counts("Name"), vec![0]);
}

#[test]
fn test_disabled_kinds_are_not_reported() {
    let mut config = Config::default();
    config.checks.types = false;
    config.checks.funcs = false;
    let lines = lint(&fixtures::blank(), &config);

    // The blank identifier is reported regardless of the enabled kinds
    assert_lines(lines, &["blank.go:3:8: _ is used 1 time"]);
}

#[test]
fn test_merged_files_share_one_graph() {
    let mut program = fixtures::blank();
    let mut functions = fixtures::functions();
    // Renumber so the two documents do not collide
    let offset = program.declaration_count() as u32;
    for file in &mut functions.files {
        for decl in &mut file.declarations {
            decl.id.0 += offset;
        }
        for occurrence in &mut file.occurrences {
            if let usecount::model::Resolution::Declaration(id)
            | usecount::model::Resolution::Dispatch(id) = &mut occurrence.resolution
            {
                id.0 += offset;
            }
        }
    }
    for alias in &mut functions.aliases {
        alias.alias.0 += offset;
        alias.original.0 += offset;
    }
    program.merge(functions);
    program.validate().unwrap();

    let lines = lint(&program, &Config::default());
    assert_eq!(lines.len(), 7 + 17);
    assert!(lines.contains(&"functions.go:5:6: a is used 3 times".to_string()));
    assert!(lines.contains(&"blank.go:16:6: fn2 is used 2 times".to_string()));
    // Two init functions, both roots
    assert_eq!(
        lines.iter().filter(|l| l.ends_with("init is used 2 times")).count(),
        2
    );
}
