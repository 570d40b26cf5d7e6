//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const TOY_SKATERS: &str = "\
playerName,team,opp,sal,proj,pos,line
A1,A,B,5000,10,C,1
A2,A,B,5000,3,W,1
A3,A,B,5000,8,W,1
B1,B,A,5000,2.5,C,1
B2,B,A,5000,7,W,1
C1,C,D,5000,6,D,1
C2,C,D,5000,6.5,D,1
X1,C,D,5000,9,W,2
X2,B,A,5000,5,D,2
";

pub const TOY_GOALIES: &str = "\
playerName,team,opp,sal,proj
G,E,F,7000,8
";

/// Write the toy slate into `dir`, returning (skaters, goalies) paths.
pub fn write_toy_slate(dir: &Path) -> (PathBuf, PathBuf) {
    write_slate(dir, TOY_SKATERS, TOY_GOALIES)
}

pub fn write_slate(dir: &Path, skaters: &str, goalies: &str) -> (PathBuf, PathBuf) {
    let skaters_path = dir.join("skaters.csv");
    let goalies_path = dir.join("goalies.csv");
    fs::write(&skaters_path, skaters).expect("write skaters");
    fs::write(&goalies_path, goalies).expect("write goalies");
    (skaters_path, goalies_path)
}
