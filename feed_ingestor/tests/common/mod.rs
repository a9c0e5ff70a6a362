#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;

/// First reported day after the skipped leading rows.
pub const FIRST_DAY: &str = "2020-03-01";
pub const DAYS: usize = 15;

pub struct FeedDir {
    _dir: TempDir, // keep alive for the life of the test
    pub cases: PathBuf,
    pub samples: PathBuf,
}

/// Case feed in the national repository's layout: four leading rows the
/// parser discards, then fifteen days where day `i` (1-based) reports
/// `100i` confirmed, `10i` recovered, `5i` deaths and `1000i` suspects.
pub fn case_feed() -> String {
    let mut s = String::from("data,data_dados,confirmados,recuperados,obitos,suspeitos,lab\n");
    for day in 26..=29 {
        s.push_str(&format!("{day}-02-2020,,1,0,0,10,\n"));
    }
    for i in 1..=DAYS {
        s.push_str(&format!(
            "{:02}-03-2020,x,{},{},{},{},0\n",
            i,
            100 * i,
            10 * i,
            5 * i,
            1000 * i
        ));
    }
    s
}

pub fn samples_feed() -> String {
    "data,amostras,amostras_novas\n13-03-2020,1200,\n14-03-2020,,\n15-03-2020,2500,300\n".to_string()
}

pub fn write_feeds() -> FeedDir {
    let dir = TempDir::new().expect("tempdir");
    let cases = dir.path().join("data.csv");
    let samples = dir.path().join("amostras.csv");
    std::fs::write(&cases, case_feed()).expect("write cases");
    std::fs::write(&samples, samples_feed()).expect("write samples");
    FeedDir {
        _dir: dir,
        cases,
        samples,
    }
}
