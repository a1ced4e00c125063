#[cfg(test)]
mod tests {
    use convext::error::Error;
    use convext::ioutils::{drain, from_byte_array, to_byte_array};
    use convext::record::RecordExt;
    use convext::value::Value;
    use indexmap::IndexMap;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Serialize, Serializer};
    use std::fs::File;
    use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
    use test_log::test;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Invoice {
        number: String,
        lines: Vec<(String, u32)>,
        total_cents: i64,
    }

    #[test]
    fn test_drain_reads_a_whole_file() {
        let mut file = tempfile::tempfile().unwrap();
        let payload: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
        file.write_all(&payload).unwrap();
        file.seek(SeekFrom::Start(0)).unwrap();

        assert_eq!(drain(&mut file).unwrap(), payload);
        // The handle stays usable after draining.
        file.seek(SeekFrom::Start(0)).unwrap();
        assert_eq!(drain(&mut file).unwrap().len(), payload.len());
    }

    #[test]
    fn test_drain_works_through_trait_objects() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        std::fs::write(&path, "line one\nline two\n").unwrap();

        let mut reader: Box<dyn std::io::Read> = Box::new(File::open(&path).unwrap());
        assert_eq!(drain(reader.as_mut()).unwrap(), b"line one\nline two\n");
    }

    struct BrokenPipe;

    impl Read for BrokenPipe {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(ErrorKind::BrokenPipe, "connection reset"))
        }
    }

    /// Streams its items without announcing a length up front.
    struct Unsized(Vec<u32>);

    impl Serialize for Unsized {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(None)?;
            for item in &self.0 {
                seq.serialize_element(item)?;
            }
            seq.end()
        }
    }

    #[test]
    fn test_drain_reports_read_failures() {
        let err = drain(&mut BrokenPipe).unwrap_err();
        assert!(matches!(err, Error::Io(ref io) if io.kind() == ErrorKind::BrokenPipe));
    }

    #[test]
    fn test_unserializable_graph_fails() {
        let err = to_byte_array(&Unsized(vec![1, 2, 3])).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_byte_array_round_trip() {
        let invoice = Invoice {
            number: "INV-001".into(),
            lines: vec![("widget".into(), 2), ("gadget".into(), 1)],
            total_cents: 12_50,
        };
        let bytes = to_byte_array(&invoice).unwrap();
        assert!(!bytes.is_empty());
        assert_eq!(from_byte_array::<Invoice>(&bytes).unwrap(), invoice);
    }

    #[test]
    fn test_record_getters() {
        let row: IndexMap<String, Value> = IndexMap::from([
            ("qty".to_string(), Value::from("3")),
            ("discount".to_string(), Value::DbNull),
        ]);
        assert_eq!(row.get_value::<i32>("qty").unwrap(), 3);
        assert_eq!(row.get_value_or::<i32>("discount", 0).unwrap(), 0);
        assert_eq!(row.get_value::<Option<i32>>("qty").unwrap(), Some(3));
    }
}
