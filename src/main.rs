use anyhow::{bail, Result};
use chrono::NaiveDate;
use dogtags::{
    output::write_artifact,
    reports::{self, Aggregate, DateRangeFilter, LicenseCounts, TopNames, UniqueBreeds},
    source::CsvRowSource,
};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// How many top dog names the ranking artifact carries.
const TOP_NAMES: usize = 5;

type Job<'a> = Box<dyn Fn() -> Result<PathBuf> + Send + Sync + 'a>;

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // ─── 2) configure paths ──────────────────────────────────────────
    let mut args = std::env::args().skip(1);
    let input = PathBuf::from(args.next().unwrap_or_else(|| "2017.csv".into()));
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "result".into()));
    info!(input = %input.display(), out = %out_dir.display(), "startup");

    // the dataset covers the 2017 license year
    let start = NaiveDate::from_ymd_opt(2017, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2017, 12, 31).unwrap();

    // ─── 3) run the four reports, each over its own pass ─────────────
    let jobs: Vec<(&str, Job<'_>)> = vec![
        (
            "uniqueBreeds",
            Box::new(|| run_report(&input, &out_dir, "uniqueBreeds.json", UniqueBreeds::new())),
        ),
        (
            "licensesByBreedAndType",
            Box::new(|| {
                run_report(
                    &input,
                    &out_dir,
                    "licensesByBreedAndType.json",
                    LicenseCounts::new(),
                )
            }),
        ),
        (
            "topDogNames",
            Box::new(|| run_report(&input, &out_dir, "topDogNames.json", TopNames::new(TOP_NAMES))),
        ),
        (
            "licensesInDateRange",
            Box::new(|| {
                run_report(
                    &input,
                    &out_dir,
                    "licensesInDateRange.json",
                    DateRangeFilter::new(start, end),
                )
            }),
        ),
    ];

    // Reports share nothing but the read-only input, so a failure in one
    // leaves the other three to finish and write their artifacts.
    let failures: usize = jobs
        .into_par_iter()
        .map(|(name, job)| match job() {
            Ok(path) => {
                info!(report = name, path = %path.display(), "report written");
                0
            }
            Err(e) => {
                error!(report = name, "report failed: {:#}", e);
                1
            }
        })
        .sum();

    if failures > 0 {
        bail!("{} of 4 reports failed", failures);
    }
    info!("all done");
    Ok(())
}

/// Open a fresh pass over `input`, stream it through `agg`, and persist the
/// finished value as a JSON artifact.
fn run_report<A>(input: &Path, out_dir: &Path, file_name: &str, agg: A) -> Result<PathBuf>
where
    A: Aggregate,
    A::Output: Serialize,
{
    let rows = CsvRowSource::open(input)?;
    let value = reports::run(rows, agg)?;
    write_artifact(out_dir, file_name, &value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dogtags::reports::LicenseCountTable;
    use std::{fs, io::Write};
    use tempfile::{tempdir, NamedTempFile};

    const SAMPLE: &str = "LicenseType,Breed,Color,DogName,OwnerZip,ExpYear,ValidDate\n\
        Dog Individual,Labrador ,BROWN,Rex,15236,2017,2017-03-01T00:00:00\n\
        Dog Individual,labrador,BLACK,rex,15001,2018,2018-01-01T00:00:00\n\
        Dog Senior,Poodle,WHITE,Max,15090,2017,2017-06-15T00:00:00\n";

    fn sample_csv() -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        file.write_all(SAMPLE.as_bytes())?;
        Ok(file)
    }

    #[test]
    fn end_to_end_writes_all_four_artifacts() -> Result<()> {
        let input = sample_csv()?;
        let out = tempdir()?;

        run_report(input.path(), out.path(), "uniqueBreeds.json", UniqueBreeds::new())?;
        run_report(
            input.path(),
            out.path(),
            "licensesByBreedAndType.json",
            LicenseCounts::new(),
        )?;
        run_report(input.path(), out.path(), "topDogNames.json", TopNames::new(5))?;
        run_report(
            input.path(),
            out.path(),
            "licensesInDateRange.json",
            DateRangeFilter::new(
                NaiveDate::from_ymd_opt(2017, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2017, 12, 31).unwrap(),
            ),
        )?;

        let breeds: Vec<String> = serde_json::from_str(&fs::read_to_string(
            out.path().join("uniqueBreeds.json"),
        )?)?;
        assert_eq!(breeds, vec!["labrador", "poodle"]);

        let table: LicenseCountTable = serde_json::from_str(&fs::read_to_string(
            out.path().join("licensesByBreedAndType.json"),
        )?)?;
        assert_eq!(table["labrador"]["Dog Individual"], 2);
        assert_eq!(table["poodle"]["Dog Senior"], 1);

        let top: Vec<(String, u64)> = serde_json::from_str(&fs::read_to_string(
            out.path().join("topDogNames.json"),
        )?)?;
        assert_eq!(top, vec![("rex".to_string(), 2), ("max".to_string(), 1)]);

        let in_range: Vec<serde_json::Value> = serde_json::from_str(&fs::read_to_string(
            out.path().join("licensesInDateRange.json"),
        )?)?;
        assert_eq!(in_range.len(), 2);
        assert_eq!(in_range[0]["DogName"], "Rex");
        assert_eq!(in_range[1]["DogName"], "Max");
        Ok(())
    }

    #[test]
    fn one_failed_report_leaves_others_intact() -> Result<()> {
        // no DogName column: the name ranking fails, the breed list does not
        let mut input = NamedTempFile::new()?;
        input.write_all(b"Breed,LicenseType,ValidDate\nPug,Dog,2017-01-05\n")?;
        let out = tempdir()?;

        assert!(run_report(
            input.path(),
            out.path(),
            "topDogNames.json",
            TopNames::new(5)
        )
        .is_err());
        assert!(!out.path().join("topDogNames.json").exists());

        run_report(input.path(), out.path(), "uniqueBreeds.json", UniqueBreeds::new())?;
        assert!(out.path().join("uniqueBreeds.json").exists());
        Ok(())
    }

    #[test]
    fn missing_input_file_fails_every_report() {
        let out = tempdir().unwrap();
        let err = run_report(
            Path::new("no/such/file.csv"),
            out.path(),
            "uniqueBreeds.json",
            UniqueBreeds::new(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("no/such/file.csv"));
    }
}
