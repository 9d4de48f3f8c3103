use std::{fs, path::PathBuf};

use tempfile::tempdir;

use arbor_cli::{Args, InputFormat, run};

/// Demos are at workspace root, relative to workspace not the crate
fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

/// Collects all files with one of `extensions` from a directory
fn collect_files(dir: PathBuf, extensions: &[&str]) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .and_then(|s| s.to_str())
                        .is_some_and(|ext| extensions.contains(&ext))
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args(input: &PathBuf, output: &PathBuf) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: Some(output.to_string_lossy().to_string()),
        config: None,
        format: InputFormat::Auto,
        force: false,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demos = collect_files(demos_dir(), &["md", "json"]);

    assert!(!demos.is_empty(), "No demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &demos {
        let stem = demo_path.file_stem().unwrap().to_string_lossy().to_string();
        for extension in ["dot", "json"] {
            let output_path = temp_dir.path().join(format!("{stem}.{extension}"));

            if let Err(e) = run(&args(demo_path, &output_path)) {
                failed_demos.push((demo_path.clone(), e));
                continue;
            }

            let written = fs::read_to_string(&output_path).expect("Failed to read output");
            assert!(!written.is_empty(), "{} produced empty output", stem);
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nDemos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} demos passed", demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_demos = collect_files(demos_dir().join("errors"), &["md", "json"]);

    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_path = temp_dir.path().join(format!(
            "error_{}.dot",
            demo_path.file_stem().unwrap().to_string_lossy()
        ));

        if run(&args(demo_path, &output_path)).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
    }

    assert!(
        unexpectedly_succeeded.is_empty(),
        "Error demos succeeded unexpectedly: {unexpectedly_succeeded:?}"
    );
}

#[test]
fn e2e_outline_terminator_is_respected() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = demos_dir().join("paper_outline.md");
    let output = temp_dir.path().join("outline.json");

    run(&args(&input, &output)).expect("Failed to run");

    let written = fs::read_to_string(&output).expect("Failed to read output");
    assert!(written.contains("Attention Is All You Need"));
    assert!(written.contains("Scaled dot-product attention"));
    assert!(!written.contains("never reaches the mindmap"));
}

#[test]
fn e2e_existing_output_is_kept_without_force() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = demos_dir().join("flat_list.md");
    let output = temp_dir.path().join("kept.dot");
    fs::write(&output, "original").expect("Failed to write output");

    run(&args(&input, &output)).expect("Skipping is not an error");
    assert_eq!(fs::read_to_string(&output).unwrap(), "original");

    let mut forced = args(&input, &output);
    forced.force = true;
    run(&forced).expect("Failed to run with --force");
    assert!(fs::read_to_string(&output).unwrap().contains("digraph"));
}

#[test]
fn e2e_explicit_format_overrides_extension() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("outline.json");
    fs::write(&input, "# Not JSON\n- really\n").expect("Failed to write input");
    let output = temp_dir.path().join("outline.dot");

    let mut as_json = args(&input, &output);
    assert!(run(&as_json).is_err());

    as_json.format = InputFormat::Markdown;
    run(&as_json).expect("Failed to run as markdown");
    assert!(fs::read_to_string(&output).unwrap().contains("Not JSON"));
}

#[test]
fn e2e_config_file_is_applied() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = demos_dir().join("flat_list.md");
    let output = temp_dir.path().join("styled.dot");

    let mut with_config = args(&input, &output);
    with_config.config = Some(demos_dir().join("arbor.toml").to_string_lossy().to_string());
    run(&with_config).expect("Failed to run with config");

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("rankdir=LR"));
    assert!(written.contains("#BF616A"));
}

#[test]
fn e2e_invalid_palette_fails_before_reading_input() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config = temp_dir.path().join("bad.toml");
    fs::write(&config, "[palette]\ncolors = [\"#000000\"]\n").expect("Failed to write config");
    let missing_input = temp_dir.path().join("missing.md");
    let output = temp_dir.path().join("out.dot");

    let mut bad = args(&missing_input, &output);
    bad.config = Some(config.to_string_lossy().to_string());

    let err = run(&bad).unwrap_err();
    assert!(err.to_string().contains("Palette error"));
    assert!(!output.exists());
}

#[test]
fn e2e_unsupported_output_extension() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = demos_dir().join("flat_list.md");
    let output = temp_dir.path().join("out.bmp");

    let err = run(&args(&input, &output)).unwrap_err();
    assert!(err.to_string().contains("unsupported output extension"));
}
