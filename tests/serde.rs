#![cfg(feature = "serde-support")]

#[macro_use] extern crate colmat;

use colmat::Matrix;

#[test]
fn json_uses_column_major_data() {
    let m = matrix![[1, 2], [3, 4]].unwrap();
    let json = serde_json::to_value(&m).unwrap();
    assert_eq!(json, serde_json::json!({
        "rows": 2,
        "columns": 2,
        "data": [1.0, 3.0, 2.0, 4.0],
    }));

    let back: Matrix = serde_json::from_value(json).unwrap();
    assert_eq!(back, m);
}

#[test]
fn deserialization_validates_shape() {
    let bad_length = serde_json::json!({ "rows": 2, "columns": 2, "data": [1.0, 2.0, 3.0] });
    assert!(serde_json::from_value::<Matrix>(bad_length).is_err());

    let zero = serde_json::json!({ "rows": 0, "columns": 2, "data": [] });
    assert!(serde_json::from_value::<Matrix>(zero).is_err());
}
