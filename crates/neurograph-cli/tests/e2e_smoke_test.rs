use std::{fs, path::PathBuf};

use tempfile::tempdir;

use neurograph_cli::{Args, run};

/// Collects all .json files from a directory
fn collect_model_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
            })
            .collect()
    } else {
        Vec::new()
    };

    files.sort();
    files
}

/// The `models/` directory at the workspace root
fn models_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("models")
}

fn args_for(input: &PathBuf, output: PathBuf, layout: Option<&str>) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        show_info: true,
        color_by: None,
        layout: layout.map(str::to_string),
        node_size_scale: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_models() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let valid_models = collect_model_files(models_dir());

    assert!(!valid_models.is_empty(), "No valid models found in models/");

    let mut failed_models = Vec::new();

    for model_path in &valid_models {
        for layout in ["spring", "circular", "hierarchical"] {
            let output_path = temp_dir.path().join(format!(
                "{}_{layout}.svg",
                model_path.file_stem().unwrap().to_string_lossy()
            ));

            let args = args_for(model_path, output_path.clone(), Some(layout));
            match run(&args) {
                Ok(()) => {
                    let svg = fs::read_to_string(&output_path).expect("SVG was written");
                    assert!(svg.starts_with("<svg"), "{} is not SVG", output_path.display());
                }
                Err(e) => failed_models.push((model_path.clone(), layout, e)),
            }
        }
    }

    if !failed_models.is_empty() {
        eprintln!("\nValid models that failed:");
        for (path, layout, err) in &failed_models {
            eprintln!("  - {} ({layout}): {}", path.display(), err);
        }
        panic!("{} valid model run(s) failed unexpectedly", failed_models.len());
    }
}

#[test]
fn e2e_smoke_test_error_models() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_models = collect_model_files(models_dir().join("errors"));

    assert!(
        !error_models.is_empty(),
        "No error models found in models/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for model_path in &error_models {
        let output_path = temp_dir.path().join(format!(
            "error_{}.svg",
            model_path.file_stem().unwrap().to_string_lossy()
        ));

        let args = args_for(model_path, output_path, None);
        if run(&args).is_ok() {
            unexpectedly_succeeded.push(model_path.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError models that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error model(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_unknown_layout_flag_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let model = collect_model_files(models_dir())
        .into_iter()
        .next()
        .expect("at least one model");

    let args = args_for(&model, temp_dir.path().join("out.svg"), Some("radial"));
    assert!(run(&args).is_err());
    assert!(!temp_dir.path().join("out.svg").exists());
}
