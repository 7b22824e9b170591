mod cli {
    #![allow(non_snake_case)]

    use assert_cmd::prelude::*;
    use mockito::{Server, ServerGuard};
    use predicates::str::contains;

    use std::path::{Path, PathBuf};
    use std::process::Command;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const NAME: &str = "sectxt-audit";
    const HEADER: &str = "index,site,contact,expires,hiring,policy,acknowledgements\n";

    fn write_sites(dir: &Path, domains: &[&str]) -> std::io::Result<PathBuf> {
        let path = dir.join("sites.csv");
        let mut content = String::from("Domain\n");
        for domain in domains {
            content.push_str(domain);
            content.push('\n');
        }
        std::fs::write(&path, content)?;
        Ok(path)
    }

    fn query(dir: &Path, sites: &Path, out: &Path) -> Result<Command, Box<dyn std::error::Error>> {
        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.arg("query")
            .arg(sites)
            .arg(out)
            .arg("--scheme")
            .arg("http")
            .arg("--no-progress")
            .arg("--no-config")
            .arg("--log-file")
            .arg(dir.join("query.log"));
        Ok(cmd)
    }

    async fn serve_security_txt(server: &mut ServerGuard, body: &str) -> Vec<mockito::Mock> {
        vec![
            server
                .mock("GET", "/.well-known/security.txt")
                .with_status(404)
                .create_async()
                .await,
            server
                .mock("GET", "/security.txt")
                .with_status(200)
                .with_body(body)
                .create_async()
                .await,
        ]
    }

    #[test]
    fn test_output__when_no_subcommand_provided() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.assert().failure().stderr(contains("Usage"));
        Ok(())
    }

    #[test]
    fn test_output__when_output_path_missing() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("query").arg("sites.csv");

        cmd.assert().failure().stderr(contains(
            "error: the following required arguments were not provided",
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_query__finds_file_on_fallback_path() -> TestResult {
        let mut server = Server::new_async().await;
        let _mocks = serve_security_txt(
            &mut server,
            "# Security contacts\nContact: mailto:a@x.com\nContact: mailto:b@x.com\nPolicy: https://x.com/policy\n",
        )
        .await;
        let dir = tempfile::tempdir()?;
        let host = server.host_with_port();
        let sites = write_sites(dir.path(), &[&host])?;
        let out = dir.path().join("out.csv");

        query(dir.path(), &sites, &out)?
            .assert()
            .success()
            .stdout(contains("Checked 1 sites, found 1 valid security.txt file(s)"));

        assert_eq!(
            std::fs::read_to_string(&out)?,
            format!(
                "{HEADER}0,http://{host},mailto:a@x.com mailto:b@x.com,,,https://x.com/policy,\n"
            )
        );
        assert!(dir.path().join("query.log").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_query__accepts_cr_only_line_endings() -> TestResult {
        let mut server = Server::new_async().await;
        let _mocks = serve_security_txt(
            &mut server,
            "Expires: 2030-01-01\rContact: mailto:a@x.com\r",
        )
        .await;
        let dir = tempfile::tempdir()?;
        let host = server.host_with_port();
        let sites = write_sites(dir.path(), &[&host])?;
        let out = dir.path().join("out.csv");

        query(dir.path(), &sites, &out)?
            .assert()
            .success()
            .stdout(contains("found 1 valid security.txt file(s)"));

        assert_eq!(
            std::fs::read_to_string(&out)?,
            format!("{HEADER}0,http://{host},mailto:a@x.com,2030-01-01,,,\n")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_query__interrupted_run_resumes_without_duplicates() -> TestResult {
        let mut server = Server::new_async().await;
        let _mocks = serve_security_txt(&mut server, "Contact: mailto:sec@x.com\n").await;
        let dir = tempfile::tempdir()?;
        let host = server.host_with_port();
        // The same origin three times stands in for three different sites
        let sites = write_sites(dir.path(), &[&host, &host, &host])?;

        let resumed = dir.path().join("resumed.csv");
        query(dir.path(), &sites, &resumed)?
            .arg("--limit")
            .arg("1")
            .assert()
            .success()
            .stdout(contains("2 sites left"));
        query(dir.path(), &sites, &resumed)?
            .assert()
            .success()
            .stdout(contains("Resumed at site 1 of 3"));

        let uninterrupted = dir.path().join("uninterrupted.csv");
        query(dir.path(), &sites, &uninterrupted)?
            .assert()
            .success();

        let resumed_content = std::fs::read_to_string(&resumed)?;
        assert_eq!(resumed_content, std::fs::read_to_string(&uninterrupted)?);
        let indices: Vec<&str> = resumed_content
            .lines()
            .skip(1)
            .map(|line| line.split(',').next().unwrap_or(""))
            .collect();
        assert_eq!(indices, vec!["0", "1", "2"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_query__corrupt_output_aborts_before_any_request() -> TestResult {
        let mut server = Server::new_async().await;
        let well_known = server
            .mock("GET", "/.well-known/security.txt")
            .expect(0)
            .create_async()
            .await;
        let root = server
            .mock("GET", "/security.txt")
            .expect(0)
            .create_async()
            .await;
        let dir = tempfile::tempdir()?;
        let host = server.host_with_port();
        let sites = write_sites(dir.path(), &[&host, &host])?;
        let out = dir.path().join("out.csv");
        let corrupt = format!("{HEADER}abc,http://{host},,,,,\n");
        std::fs::write(&out, &corrupt)?;

        query(dir.path(), &sites, &out)?
            .assert()
            .failure()
            .stderr(contains("Corrupt resume state"))
            .stderr(contains("index 'abc' is not an integer"));

        well_known.assert_async().await;
        root.assert_async().await;
        assert_eq!(std::fs::read_to_string(&out)?, corrupt);
        Ok(())
    }

    #[test]
    fn test_query__zero_timeout_is_rejected() -> TestResult {
        let dir = tempfile::tempdir()?;
        let sites = write_sites(dir.path(), &["example.com"])?;
        let out = dir.path().join("out.csv");

        query(dir.path(), &sites, &out)?
            .arg("--timeout")
            .arg("0")
            .assert()
            .failure()
            .stderr(contains("timeout must be a positive number of seconds"));

        assert!(!out.exists());
        Ok(())
    }

    #[test]
    fn test_query__missing_sites_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let out = dir.path().join("out.csv");

        query(dir.path(), &dir.path().join("nope.csv"), &out)?
            .assert()
            .failure()
            .stderr(contains("Error:"));
        Ok(())
    }

    #[test]
    fn test_preprocess__extracts_domain_column() -> TestResult {
        let dir = tempfile::tempdir()?;
        let ranking = dir.path().join("majestic_million.csv");
        let out = dir.path().join("sites.csv");
        std::fs::write(
            &ranking,
            "GlobalRank,TldRank,Domain,TLD\n1,1,google.com,com\n2,2,facebook.com,com\n",
        )?;

        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.arg("preprocess").arg(&ranking).arg(&out);

        cmd.assert()
            .success()
            .stdout(contains("Wrote 2 records to"));
        assert_eq!(
            std::fs::read_to_string(&out)?,
            "Domain\ngoogle.com\nfacebook.com\n"
        );
        Ok(())
    }

    #[test]
    fn test_preprocess__no_progress() -> TestResult {
        let dir = tempfile::tempdir()?;
        let ranking = dir.path().join("ranking.csv");
        let out = dir.path().join("sites.csv");
        std::fs::write(&ranking, "Domain\na.com\n")?;

        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.arg("preprocess").arg(&ranking).arg(&out).arg("--no-progress");

        cmd.assert()
            .success()
            .stdout(contains("Wrote 1 records to"));
        Ok(())
    }
}
