// Ratio tables: headerless CSV rows of `from,to,ratio`, meaning 1 from = ratio to.
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use crate::error::TableError;
use crate::units::Edge;

pub fn read_edges<R: Read>(reader: R) -> Result<Vec<Edge>, TableError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut edges = Vec::new();
    let mut record = StringRecord::new();
    let mut row = 0;
    while rdr.read_record(&mut record)? {
        row += 1;
        edges.push(edge_from_record(&record, row)?);
    }
    debug!(rows = edges.len(), "ratio table read");
    Ok(edges)
}

pub fn load(path: impl AsRef<Path>) -> Result<Vec<Edge>, TableError> {
    let path = path.as_ref();
    let edges = read_edges(File::open(path)?)?;
    info!(path = %path.display(), rows = edges.len(), "ratio table loaded");
    Ok(edges)
}

fn edge_from_record(record: &StringRecord, row: usize) -> Result<Edge, TableError> {
    match (record.get(0), record.get(1), record.get(2)) {
        (Some(from), Some(to), Some(ratio)) if record.len() == 3 => {
            Edge::parse(from, to, ratio).map_err(|source| TableError::Edge { row, source })
        }
        _ => Err(TableError::MalformedRow {
            row,
            found: record.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EdgeError;
    use crate::math::num;

    #[test]
    fn reads_rows_in_order() {
        let edges = read_edges("m,cm,100\nmm, m ,0.001\nkm,m,1000".as_bytes()).unwrap();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0], Edge::new("m", "cm", num!(100, 1)).unwrap());
        assert_eq!(edges[1].from, "mm");
        assert_eq!(edges[1].to, "m");
        assert_eq!(edges[1].ratio, num!(1, 1000));
    }

    #[test]
    fn keeps_non_ascii_symbols() {
        let edges = read_edges("час,мин,60\nмин,с,60\n".as_bytes()).unwrap();
        assert_eq!(edges[0].from, "час");
        assert_eq!(edges[1].to, "с");
    }

    #[test]
    fn empty_table() {
        assert!(read_edges("".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn wrong_field_count() {
        let err = read_edges("m,cm,100\nkm,m\n".as_bytes()).unwrap_err();
        assert!(matches!(err, TableError::MalformedRow { row: 2, found: 2 }));

        let err = read_edges("m,cm,100,extra\n".as_bytes()).unwrap_err();
        assert!(matches!(err, TableError::MalformedRow { row: 1, found: 4 }));
    }

    #[test]
    fn bad_ratio_names_row() {
        let err = read_edges("m,cm,100\nkm,m,lots\n".as_bytes()).unwrap_err();
        match err {
            TableError::Edge { row, source } => {
                assert_eq!(row, 2);
                assert_eq!(source, EdgeError::InvalidRatio("lots".to_owned()));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            read_edges("a,b,0\n".as_bytes()),
            Err(TableError::Edge { row: 1, source: EdgeError::ZeroRatio { .. } })
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            load("/definitely/not/a/table.csv"),
            Err(TableError::Io(_))
        ));
    }
}
