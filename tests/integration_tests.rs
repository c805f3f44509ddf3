use anyhow::Result;
use beni::core::render;
use beni::{DependencyEntry, EnvironmentEngine, ForgeChecker, ForgeConfig};
use httpmock::prelude::*;
use std::collections::HashSet;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_manifest(dir: &TempDir, file: &str, content: &str) -> PathBuf {
    let path = dir.path().join(file);
    std::fs::write(&path, content).unwrap();
    path
}

fn engine_for(server: &MockServer) -> EnvironmentEngine<ForgeChecker> {
    let checker =
        ForgeChecker::new(ForgeConfig::default().with_base_url(server.base_url())).unwrap();
    EnvironmentEngine::new(checker)
}

#[tokio::test]
async fn test_end_to_end_environment_yaml() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let core = write_manifest(
        &temp_dir,
        "core.toml",
        r#"
[tool.flit.metadata]
module = "beni_core"
requires-python = ">=3.6"
requires = ["numpy >=1.16", "typeguard", "tqdm"]
"#,
    );
    let cli = write_manifest(
        &temp_dir,
        "cli.toml",
        r#"
[tool.flit.metadata]
module = "beni_cli"
requires = ["beni_core", "flit_core >=2,<4"]

[tool.flit.metadata.requires-extra]
test = ["pytest"]
"#,
    );

    let server = MockServer::start_async().await;
    let numpy = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/conda-forge/numpy/")
                .header("User-Agent", "beni");
            then.status(200);
        })
        .await;
    let flit_core = server
        .mock_async(|when, then| {
            when.method(GET).path("/conda-forge/flit_core/");
            then.status(200);
        })
        .await;
    let tqdm = server
        .mock_async(|when, then| {
            when.method(GET).path("/conda-forge/tqdm/");
            then.status(200);
        })
        .await;
    let typeguard = server
        .mock_async(|when, then| {
            when.method(GET).path("/conda-forge/typeguard/");
            then.status(302).header("Location", "/conda-forge/");
        })
        .await;
    let pytest = server
        .mock_async(|when, then| {
            when.method(GET).path("/conda-forge/pytest/");
            then.status(200);
        })
        .await;
    let own_module = server
        .mock_async(|when, then| {
            when.method(GET).path("/conda-forge/beni_core/");
            then.status(200);
        })
        .await;

    let engine = engine_for(&server);
    let yaml = engine.render(&[core, cli], &["pytest".to_string()]).await?;

    numpy.assert_async().await;
    flit_core.assert_async().await;
    tqdm.assert_async().await;
    typeguard.assert_async().await;
    pytest.assert_hits_async(0).await;
    own_module.assert_hits_async(0).await;

    let env = render::from_yaml(&yaml)?;
    assert_eq!(env.name, "beni_core");
    assert_eq!(env.channels, vec!["conda-forge"]);
    assert_eq!(env.dependencies[0], DependencyEntry::pip_bootstrap());

    let packages: HashSet<&str> = env.packages().collect();
    let expected: HashSet<&str> = ["pip", "python>=3.6", "numpy>=1.16", "tqdm", "flit_core<4,>=2"]
        .into_iter()
        .collect();
    assert_eq!(packages, expected);
    assert_eq!(env.packages().count(), expected.len());

    Ok(())
}

#[tokio::test]
async fn test_project_table_without_python_constraint() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let manifest = write_manifest(
        &temp_dir,
        "pyproject.toml",
        r#"
[project]
name = "data-tool"
dependencies = ["requests"]
"#,
    );

    let server = MockServer::start_async().await;
    let requests = server
        .mock_async(|when, then| {
            when.method(GET).path("/conda-forge/requests/");
            then.status(200);
        })
        .await;

    let env = engine_for(&server).run(&[manifest], &[]).await?;
    requests.assert_async().await;

    assert_eq!(env.name, "data_tool");
    assert_eq!(
        env.packages().collect::<Vec<_>>(),
        vec!["pip", "python", "requests"]
    );

    Ok(())
}

#[tokio::test]
async fn test_server_error_drops_package() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let manifest = write_manifest(
        &temp_dir,
        "pyproject.toml",
        "[tool.flit.metadata]\nmodule = \"m\"\nrequires = [\"broken\"]\n",
    );

    let server = MockServer::start_async().await;
    let broken = server
        .mock_async(|when, then| {
            when.method(GET).path("/conda-forge/broken/");
            then.status(503);
        })
        .await;

    let env = engine_for(&server).run(&[manifest], &[]).await?;
    broken.assert_async().await;
    assert!(!env.contains_package("broken"));

    Ok(())
}

#[tokio::test]
async fn test_invalid_requirement_aborts_before_network() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let manifest = write_manifest(
        &temp_dir,
        "pyproject.toml",
        "[tool.flit.metadata]\nmodule = \"m\"\nrequires = [\"numpy\", \"scipy >> 1\"]\n",
    );

    let server = MockServer::start_async().await;
    let any = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200);
        })
        .await;

    let result = engine_for(&server).run(&[manifest], &[]).await;
    assert!(result.is_err());
    any.assert_hits_async(0).await;

    Ok(())
}

#[tokio::test]
async fn test_invalid_marker_or_version_aborts_before_network() -> Result<()> {
    let server = MockServer::start_async().await;
    let any = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200);
        })
        .await;

    for bad in ["scipy; garbage", "scipy>=1.*", "scipy~=1"] {
        let temp_dir = TempDir::new()?;
        let manifest = write_manifest(
            &temp_dir,
            "pyproject.toml",
            &format!(
                "[tool.flit.metadata]\nmodule = \"m\"\nrequires = [\"numpy\", \"{}\"]\n",
                bad
            ),
        );

        let result = engine_for(&server).run(&[manifest], &[]).await;
        assert!(result.is_err(), "{} should be rejected", bad);
    }
    any.assert_hits_async(0).await;

    Ok(())
}
