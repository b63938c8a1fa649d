//! Scalar coercion integration tests

use arbor::{
    array, group,
    tree::{Document, Scalar, TreeError, Value},
};

fn scalars() -> Document {
    Document::new(group! {
        "int" => -5,
        "uint" => 300u32,
        "float" => 2.75,
        "bool" => true,
        "char" => 'λ',
        "text" => "hello",
        "bytes" => b"bytes".to_vec(),
        "nil" => (),
        "list" => array![1],
    })
}

#[test]
fn test_integers_convert_between_widths() {
    let doc = scalars();
    let int = doc.get("int").unwrap();
    assert_eq!(int.as_i64().unwrap(), -5);
    assert_eq!(int.as_i8().unwrap(), -5);
    assert_eq!(int.as_u8().unwrap(), 251);
    assert_eq!(int.as_f64().unwrap(), -5.0);

    let uint = doc.get("uint").unwrap();
    assert_eq!(uint.as_u16().unwrap(), 300);
    assert_eq!(uint.as_u8().unwrap(), 44);
    assert_eq!(uint.as_isize().unwrap(), 300);
    assert_eq!(uint.as_f32().unwrap(), 300.0);
}

#[test]
fn test_floats_truncate_toward_zero() {
    let doc = scalars();
    let float = doc.get("float").unwrap();
    assert_eq!(float.as_i32().unwrap(), 2);
    assert_eq!(float.as_u64().unwrap(), 2);
    assert_eq!(float.as_f32().unwrap(), 2.75);

    let doc = Document::new(group! { "neg" => -1.5, "huge" => 1e300 });
    assert_eq!(doc.get("neg").unwrap().as_u8().unwrap(), 0);
    assert_eq!(doc.get("huge").unwrap().as_i16().unwrap(), i16::MAX);
}

#[test]
fn test_text_bytes_and_chars_interconvert() {
    let doc = scalars();
    assert_eq!(doc.get("text").unwrap().as_bytes().unwrap(), b"hello".to_vec());
    assert_eq!(doc.get("bytes").unwrap().as_string().unwrap(), "bytes");
    assert_eq!(doc.get("bytes").unwrap().as_str().unwrap(), "bytes");
    assert_eq!(doc.get("char").unwrap().as_string().unwrap(), "λ");
    assert_eq!(doc.get("char").unwrap().as_bytes().unwrap(), "λ".as_bytes().to_vec());
    assert_eq!(
        doc.get("text").unwrap().as_chars().unwrap(),
        vec!['h', 'e', 'l', 'l', 'o']
    );
    assert_eq!(doc.get("char").unwrap().as_u32().unwrap(), 'λ' as u32);
}

#[test]
fn test_single_char_text_is_a_char() {
    let mut doc = scalars();
    doc.set("one", "x").unwrap();
    assert_eq!(doc.get("one").unwrap().as_char().unwrap(), 'x');
    assert!(doc.get("text").unwrap().as_char().is_err());
}

#[test]
fn test_unrepresentable_conversions_fail() {
    let doc = scalars();
    assert_eq!(
        doc.get("text").unwrap().as_i64().unwrap_err(),
        TreeError::TypeMismatch {
            expected: "i64",
            actual: "text"
        }
    );
    assert!(doc.get("int").unwrap().as_string().unwrap_err().is_type_error());
    assert!(doc.get("int").unwrap().as_bool().is_err());
    assert!(doc.get("bool").unwrap().as_i64().is_err());
    assert!(doc.get("nil").unwrap().as_f64().is_err());
    assert!(doc.get("bool").unwrap().as_bool().unwrap());

    let invalid = Document::new(group! { "b" => vec![0xc3u8, 0x28] });
    assert!(invalid.get("b").unwrap().as_string().is_err());
}

#[test]
fn test_containers_are_not_scalars() {
    let doc = scalars();
    assert_eq!(
        doc.get("list").unwrap().as_i64().unwrap_err(),
        TreeError::TypeMismatch {
            expected: "i64",
            actual: "array"
        }
    );
    assert_eq!(
        doc.root().as_string().unwrap_err(),
        TreeError::TypeMismatch {
            expected: "String",
            actual: "group"
        }
    );
    assert!(doc.get("list").unwrap().scalar().is_none());
}

#[test]
fn test_value_extraction_with_try_from() {
    let value = scalars().to_value();
    let map = value.as_group().unwrap();

    assert_eq!(String::try_from(&map["text"]).unwrap(), "hello");
    assert_eq!(i64::try_from(&map["uint"]).unwrap(), 300);
    assert_eq!(u64::try_from(&map["float"]).unwrap(), 2);
    assert_eq!(f64::try_from(&map["int"]).unwrap(), -5.0);
    assert!(bool::try_from(&map["bool"]).unwrap());
    assert!(String::try_from(&map["list"]).is_err());
}

#[test]
fn test_value_comparisons_with_primitives() {
    let value = scalars().to_value();
    let map = value.as_group().unwrap();

    assert_eq!(map["text"], "hello");
    assert_eq!(map["int"], -5);
    assert_eq!(map["float"], 2.75);
    assert_eq!(map["bool"], true);
    assert_eq!(map["uint"], Value::Scalar(Scalar::Uint(300)));
    assert_eq!(map["uint"], Value::Scalar(Scalar::Int(300)));
    assert_ne!(map["uint"], Value::Scalar(Scalar::Float(300.0)));
}
