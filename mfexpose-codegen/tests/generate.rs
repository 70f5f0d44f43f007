//! End-to-end generation against a temporary project layout.

use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use mfexpose_codegen::{CycleOutcome, Generator, Observation, Trigger, WatchSession, regenerate};
use mfexpose_config::{Config, FileType, ReplaceRule, Transform};
use tempfile::TempDir;

struct Project {
    _temp: TempDir,
    barrel: PathBuf,
    exposes: PathBuf,
}

impl Project {
    fn new(barrel: &str) -> Self {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        let barrel_path = src.join("index.ts");
        fs::write(&barrel_path, barrel).unwrap();
        Self {
            barrel: barrel_path,
            exposes: src.join("exposes"),
            _temp: temp,
        }
    }

    fn config(&self) -> Config {
        Config::new(&self.barrel, &self.exposes)
            .with_transform(Transform::new(vec![ReplaceRule::new("./", "../")]))
    }

    fn generator(&self) -> Generator {
        Generator::new(self.config()).unwrap()
    }

    fn read(&self, name: &str) -> String {
        fs::read_to_string(self.exposes.join(name)).unwrap()
    }

    fn listing(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.exposes)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    fn rewrite(&self, barrel: &str) {
        fs::write(&self.barrel, barrel).unwrap();
    }
}

fn up_one(specifier: &str) -> String {
    specifier.replacen("./", "../", 1)
}

#[test]
fn test_named_re_export_end_to_end() {
    let project = Project::new(r#"export { get } from "./utils";"#);

    regenerate(&project.barrel, &project.exposes, FileType::Ts, &up_one).unwrap();

    assert_eq!(project.listing(), vec!["get.ts", "index.json"]);
    assert_eq!(project.read("get.ts"), r#"export { get as default } from "../utils";"#);
    insta::assert_snapshot!(project.read("index.json"), @r#"
    {
      "./get": "./exposes/get"
    }
    "#);
}

#[test]
fn test_six_shapes_through_generator() {
    let project = Project::new(
        r#"export { get, pick as myPick } from "./utils";
export { default } from "./main";
export { default as Utils } from "./utils";
export * as helpers from "./helpers";
export type { TUtils } from "./utils";
"#,
    );

    let report = project.generator().generate().unwrap();

    assert_eq!(report.facade_count(), 5);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(
        project.listing(),
        vec!["Utils.ts", "default.ts", "get.ts", "helpers.ts", "index.json", "myPick.ts"]
    );
    assert_eq!(project.read("myPick.ts"), r#"export { pick as default } from "../utils";"#);
    assert_eq!(project.read("default.ts"), r#"export { default } from "../main";"#);
    assert_eq!(project.read("Utils.ts"), r#"export { default } from "../utils";"#);
    assert_eq!(project.read("helpers.ts"), r#"export * as default from "../helpers";"#);
    insta::assert_snapshot!(project.read("index.json"), @r#"
    {
      "./get": "./exposes/get",
      "./myPick": "./exposes/myPick",
      "./default": "./exposes/default",
      "./Utils": "./exposes/Utils",
      "./helpers": "./exposes/helpers"
    }
    "#);
}

#[test]
fn test_type_only_barrel_yields_empty_manifest() {
    let project = Project::new(r#"export type { TUtils } from "./utils";"#);

    let report = project.generator().generate().unwrap();

    assert!(report.symbols.is_empty());
    assert_eq!(project.listing(), vec!["index.json"]);
    assert_eq!(project.read("index.json"), "{}");
}

#[test]
fn test_regeneration_is_idempotent() {
    let project = Project::new(
        r#"export { a, b as B } from "./ab";
export * as c from "./c";
"#,
    );
    let generator = project.generator();

    generator.generate().unwrap();
    let first: Vec<(String, String)> = project
        .listing()
        .into_iter()
        .map(|n| (project.read(&n), n))
        .collect();
    generator.generate().unwrap();
    let second: Vec<(String, String)> = project
        .listing()
        .into_iter()
        .map(|n| (project.read(&n), n))
        .collect();

    assert_eq!(first, second);
}

#[test]
fn test_removed_export_drops_stale_facade() {
    let project = Project::new(r#"export { a, b } from "./ab";"#);
    let generator = project.generator();
    generator.generate().unwrap();

    project.rewrite(r#"export { a } from "./ab";"#);
    generator.generate().unwrap();

    assert_eq!(project.listing(), vec!["a.ts", "index.json"]);
}

#[test]
fn test_parse_failure_keeps_previous_output() {
    let project = Project::new(r#"export { a } from "./a";"#);
    let generator = project.generator();
    generator.generate().unwrap();

    project.rewrite("export { a from ");
    assert!(generator.generate().is_err());

    assert_eq!(project.listing(), vec!["a.ts", "index.json"]);
    assert_eq!(project.read("a.ts"), r#"export { a as default } from "../a";"#);
}

#[test]
fn test_js_filetype() {
    let project = Project::new(r#"export { get } from "./utils";"#);
    let generator = Generator::new(project.config().with_filetype(FileType::Js)).unwrap();

    generator.generate().unwrap();

    assert_eq!(project.listing(), vec!["get.js", "index.json"]);
}

#[test]
fn test_preview_writes_nothing() {
    let project = Project::new(
        r#"export { Button } from "./legacy";
export { NewButton as Button } from "./button";
"#,
    );

    let files = project.generator().preview().unwrap();

    assert!(!project.exposes.exists());
    let paths: Vec<PathBuf> = files.iter().map(|f| f.path.clone()).collect();
    assert_eq!(
        paths,
        vec![
            project.exposes.join("Button.ts"),
            project.exposes.join("index.json"),
        ]
    );
    assert_eq!(files[0].content, r#"export { NewButton as default } from "../button";"#);
}

#[test]
fn test_generator_rejects_output_containing_barrel() {
    let project = Project::new(r#"export { a } from "./a";"#);
    let config = Config::new(&project.barrel, project.barrel.parent().unwrap());

    assert!(Generator::new(config).is_err());
}

fn bump(path: &Path, secs: u64) -> (PathBuf, SystemTime) {
    (path.to_path_buf(), SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
}

#[test]
fn test_watch_session_lifecycle() {
    let project = Project::new(r#"export { a } from "./a";"#);
    let mut session = WatchSession::new(project.generator());

    let outcome = session.cycle([bump(&project.barrel, 100)]).unwrap();
    assert!(matches!(
        outcome,
        CycleOutcome::Regenerated {
            trigger: Trigger::OutputMissing,
            ..
        }
    ));

    let outcome = session.cycle([bump(&project.barrel, 100)]).unwrap();
    assert!(matches!(outcome, CycleOutcome::Idle));

    project.rewrite(r#"export { a, b } from "./ab";"#);
    let outcome = session.cycle([bump(&project.barrel, 200)]).unwrap();
    assert!(matches!(
        outcome,
        CycleOutcome::Regenerated {
            trigger: Trigger::BarrelChanged(Observation::Advanced),
            ..
        }
    ));
    assert_eq!(project.listing(), vec!["a.ts", "b.ts", "index.json"]);
}

#[test]
fn test_watch_ignores_other_files() {
    let project = Project::new(r#"export { a } from "./a";"#);
    let mut session = WatchSession::new(project.generator());
    session.cycle([bump(&project.barrel, 100)]).unwrap();

    let other = project.barrel.with_file_name("a.ts");
    fs::write(&other, "export const a = 1;").unwrap();
    let outcome = session.cycle([bump(&other, 300)]).unwrap();

    assert!(matches!(outcome, CycleOutcome::Idle));
    assert_eq!(session.tracker().len(), 2);
}

#[test]
fn test_watch_regenerates_deleted_output() {
    let project = Project::new(r#"export { a } from "./a";"#);
    let mut session = WatchSession::new(project.generator());
    session.cycle([bump(&project.barrel, 100)]).unwrap();

    fs::remove_dir_all(&project.exposes).unwrap();
    let outcome = session.cycle(Vec::new()).unwrap();

    assert!(matches!(
        outcome,
        CycleOutcome::Regenerated {
            trigger: Trigger::OutputMissing,
            ..
        }
    ));
    assert!(project.exposes.join("a.ts").exists());
}

#[test]
fn test_watch_first_sight_of_barrel_regenerates() {
    let project = Project::new(r#"export { a } from "./a";"#);
    project.generator().generate().unwrap();
    let mut session = WatchSession::new(project.generator());

    let outcome = session.poll().unwrap();

    assert!(matches!(
        outcome,
        CycleOutcome::Regenerated {
            trigger: Trigger::BarrelChanged(Observation::First),
            ..
        }
    ));
    assert!(matches!(session.poll().unwrap(), CycleOutcome::Idle));
}

#[test]
fn test_string_alias_cannot_escape_generate_dir() {
    let project = Project::new(
        r#"export { a as "../../outside" } from "./a";
export { b } from "./b";
"#,
    );

    let report = project.generator().generate().unwrap();

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(project.listing(), vec!["b.ts", "index.json"]);
    let root = project.exposes.parent().unwrap().parent().unwrap();
    assert!(!root.join("outside.ts").exists());
    assert!(!project.read("index.json").contains("outside"));
}

#[test]
fn test_generator_rejects_parent_segments_onto_barrel_dir() {
    let project = Project::new(r#"export { a } from "./a";"#);
    let src = project.barrel.parent().unwrap();
    let config = Config::new(&project.barrel, src.join("..").join("src"));

    assert!(Generator::new(config).is_err());
    assert!(project.barrel.exists());
}
