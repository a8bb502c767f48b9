//! Sample catalog seeder — companies and computers for a fresh database.

use std::collections::HashMap;

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::models::computer::ComputerData;
use crate::schema::{company, computer};
use crate::services::company_service;

const COMPANIES: &[&str] = &[
    "Apple Inc.",
    "Thinking Machines",
    "RCA",
    "Netronics",
    "Tandy Corporation",
    "Commodore International",
    "MOS Technology",
    "Micro Instrumentation and Telemetry Systems",
    "IMS Associates, Inc.",
    "Digital Equipment Corporation",
    "Lincoln Laboratory",
    "Moore School of Electrical Engineering",
    "IBM",
    "Amiga Corporation",
    "NeXT",
    "Atari",
    "Acorn computer",
    "Sinclair Research Ltd",
    "Xerox",
    "Cray",
    "Nintendo",
    "Sun Microsystems",
    "Texas Instruments",
    "Amstrad",
];

/// (name, introduced, discontinued, company)
type SampleComputer = (
    &'static str,
    Option<&'static str>,
    Option<&'static str>,
    Option<&'static str>,
);

const COMPUTERS: &[SampleComputer] = &[
    ("MacBook Pro 15.4 inch", None, None, Some("Apple Inc.")),
    ("CM-2a", None, None, Some("Thinking Machines")),
    ("CM-200", None, None, Some("Thinking Machines")),
    ("CM-5e", None, None, Some("Thinking Machines")),
    ("CM-5", Some("1991-01-01"), None, Some("Thinking Machines")),
    ("MacBook Pro", Some("2006-01-10"), None, Some("Apple Inc.")),
    ("Apple IIe", None, None, None),
    ("Apple IIc", None, None, None),
    ("Apple IIGS", None, None, None),
    ("Apple IIc Plus", None, None, None),
    ("Apple II Plus", None, None, None),
    ("Apple III", Some("1980-05-01"), Some("1984-04-01"), Some("Apple Inc.")),
    ("Apple Lisa", None, None, Some("Apple Inc.")),
    ("CM-2", None, None, Some("Thinking Machines")),
    ("Connection Machine", Some("1987-01-01"), None, Some("Thinking Machines")),
    ("Apple II", Some("1977-04-01"), Some("1993-10-01"), Some("Apple Inc.")),
    ("Apple III Plus", Some("1983-12-01"), Some("1984-04-01"), Some("Apple Inc.")),
    ("COSMAC ELF", None, None, Some("RCA")),
    ("COSMAC VIP", Some("1977-01-01"), None, Some("RCA")),
    ("ELF II", Some("1977-01-01"), None, Some("Netronics")),
    ("Macintosh", Some("1984-01-24"), None, Some("Apple Inc.")),
    ("Macintosh II", None, None, None),
    ("Macintosh Plus", Some("1986-01-16"), Some("1990-10-15"), Some("Apple Inc.")),
    ("Macintosh IIfx", None, None, None),
    ("iMac", Some("1998-01-01"), None, Some("Apple Inc.")),
    ("TRS-80 Color Computer", Some("1980-01-01"), None, Some("Tandy Corporation")),
    ("Commodore PET", None, None, Some("Commodore International")),
    ("Commodore 64", Some("1982-08-01"), Some("1994-01-01"), Some("Commodore International")),
    ("Commodore 128", Some("1985-01-01"), Some("1989-01-01"), Some("Commodore International")),
    ("KIM-1", Some("1975-01-01"), None, Some("MOS Technology")),
    ("Altair 8800", Some("1974-12-19"), None, Some("Micro Instrumentation and Telemetry Systems")),
    ("IMSAI 8080", Some("1975-08-01"), None, Some("IMS Associates, Inc.")),
    ("PDP-1", None, None, Some("Digital Equipment Corporation")),
    ("PDP-8", Some("1965-03-22"), None, Some("Digital Equipment Corporation")),
    ("VAX", Some("1977-10-25"), None, Some("Digital Equipment Corporation")),
    ("TX-0", Some("1956-01-01"), None, Some("Lincoln Laboratory")),
    ("ENIAC", Some("1946-02-15"), Some("1955-10-02"), Some("Moore School of Electrical Engineering")),
    ("IBM PC", Some("1981-08-12"), Some("1987-04-02"), Some("IBM")),
    ("IBM 7090", Some("1959-01-01"), None, Some("IBM")),
    ("Amiga 500", Some("1987-01-01"), None, Some("Commodore International")),
    ("Amiga 1000", Some("1985-01-01"), None, Some("Amiga Corporation")),
    ("NeXTcube", Some("1988-01-01"), Some("1993-01-01"), Some("NeXT")),
    ("Atari ST", Some("1985-01-01"), None, Some("Atari")),
    ("BBC Micro", Some("1981-12-01"), Some("1994-01-01"), Some("Acorn computer")),
    ("ZX Spectrum", Some("1982-04-23"), None, Some("Sinclair Research Ltd")),
    ("Xerox Alto", Some("1973-03-01"), None, Some("Xerox")),
    ("Cray-1", Some("1976-01-01"), None, Some("Cray")),
    ("Game Boy", Some("1989-04-21"), None, Some("Nintendo")),
    ("Sun-1", Some("1982-01-01"), None, Some("Sun Microsystems")),
    ("TI-99/4A", Some("1981-06-01"), Some("1984-03-01"), Some("Texas Instruments")),
    ("Amstrad CPC 464", Some("1984-04-11"), None, Some("Amstrad")),
];

fn parse_date(raw: Option<&str>) -> anyhow::Result<Option<NaiveDate>> {
    raw.map(|s| NaiveDate::parse_from_str(s, crate::forms::DATE_FORMAT))
        .transpose()
        .map_err(|e| anyhow::anyhow!("sample date {raw:?}: {e}"))
}

/// Resolve the sample computers against the inserted company ids.
fn sample_computers(company_ids: &HashMap<String, i64>) -> anyhow::Result<Vec<ComputerData>> {
    COMPUTERS
        .iter()
        .map(|&(name, introduced, discontinued, company_name)| {
            Ok(ComputerData {
                name: name.to_string(),
                introduced: parse_date(introduced)?,
                discontinued: parse_date(discontinued)?,
                company_id: company_name.and_then(|c| company_ids.get(c).copied()),
            })
        })
        .collect()
}

/// Insert the sample catalog unless companies already exist.
///
/// Runs in one transaction; returns the number of computers inserted.
pub async fn seed_sample_data(conn: &mut AsyncPgConnection) -> anyhow::Result<usize> {
    if company_service::count(conn).await? > 0 {
        tracing::info!("Catalog already has companies, skipping sample data");
        return Ok(0);
    }

    let inserted = conn
        .transaction::<_, anyhow::Error, _>(|conn| {
            async move {
                let rows: Vec<_> = COMPANIES.iter().map(|n| company::name.eq(*n)).collect();
                let companies: Vec<(i64, String)> = diesel::insert_into(company::table)
                    .values(&rows)
                    .returning((company::id, company::name))
                    .get_results(conn)
                    .await?;
                let company_ids: HashMap<String, i64> =
                    companies.into_iter().map(|(id, name)| (name, id)).collect();

                let computers = sample_computers(&company_ids)?;
                let inserted = diesel::insert_into(computer::table)
                    .values(&computers)
                    .execute(conn)
                    .await?;
                Ok(inserted)
            }
            .scope_boxed()
        })
        .await?;

    tracing::info!(
        companies = COMPANIES.len(),
        computers = inserted,
        "Seeded sample catalog"
    );
    Ok(inserted)
}
