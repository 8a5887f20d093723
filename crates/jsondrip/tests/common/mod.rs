//! Reference documents shared by the integration suites.
#![allow(dead_code)]

/// A document exercising every value kind, nesting, and number notation.
/// Ends on line 32, column 2.
pub const JSTR_FULL: &str = r#"{
  "Type1":"John",
  "Type2":"Smith",
  "Type3":25,
  "Type4":null,
  "Type5":true,
  "Type6":false,
  "Type7":
  {
    "Type1":"John",
    "Type2":"Smith",
    "Type3":25,
    "Type4":null,
    "Type5":true,
    "Type6":false
  },
  "Type8":["John","Smith"," Escaped \" ",25,null,true,false],
  "TypeNum":[0,-1,1,2.0,3.45,-4.67e2,5e-1,6e3,5e+1,-5.6e+2],
  "TypeMix":
  [
    67,null,[],{"Hello":[true]},false,"Bye",
    {
      "Type21":"John",
      "Type22":"Smith",
      "Type23":{}
    },
    {
      "type":"fax",
      "number":"646 555-4567"
    }
  ]
}"#;

/// Expected packed serialization of [`JSTR_FULL`].
pub const JSTR_FULL_PACKED: &str = r#"{"Type1":"John","Type2":"Smith","Type3":25,"Type4":null,"Type5":true,"Type6":false,"Type7":{"Type1":"John","Type2":"Smith","Type3":25,"Type4":null,"Type5":true,"Type6":false},"Type8":["John","Smith"," Escaped \" ",25,null,true,false],"TypeNum":[0,-1,1,2,3.45,-467,0.50,6000,50,-560],"TypeMix":[67,null,[],{"Hello":[true]},false,"Bye",{"Type21":"John","Type22":"Smith","Type23":{}},{"type":"fax","number":"646 555-4567"}]}"#;

/// [`JSTR_FULL`] followed by a second root: invalid as a single document.
pub fn double_root() -> String {
    format!("{JSTR_FULL}             \n{{ \"DoubleRoot\":null }}\n")
}

/// Lexical error: trailing `a` on a number, line 4 column 13.
pub const JSTR_LEX_ERROR: &str = r#"{
  "Type1":"John",
  "Type2":"Smith",
  "Type3":25a,
  "Type4":null,
  "Type5":true,
}"#;

/// Syntax error: missing colon, string token at line 3 column 17.
pub const JSTR_SYNTAX_ERROR: &str = r#"{
  "Type1":"John",
  "Type2" "Smith",
  "Type3":25,
  "Type4":null,
  "Type5":true,
}"#;

/// Truncated document: ends after `true` on line 6, column 15.
pub const JSTR_INCOMPLETE: &str = r#"{
  "Type1":"John",
  "Type2":"Smith",
  "Type3":25,
  "Type4":null,
  "Type5":true"#;

pub const JSTR_OBJECT_BEFORE: &str = r#"{"Object1":{"0":0,"1":1,"2":2,"3":3,"4":4,"5":5,"6":6},"Object2":{"Num1":56,"Str1":"Str1","Bool1":true,"Str2":"Hello","Null":null},"Object3":{"Num1":56,"Bool1":true,"String1":"String","Null":null},"Object4":{}}"#;

pub const JSTR_OBJECT_AFTER: &str = r#"{"Object1":{"0":0,"1":1,"2":2,"3":3,"4":4,"5":5,"6":6},"Object2":{"Num3":57,"Num2":56,"Num1":156,"Str3":"new","Bool1":false,"Str2":"HelloStr2","Null":null},"Object3":{},"Object4":{"NumberOne":1},"Object5":true}"#;

pub const JSTR_ARRAY_BEFORE: &str = r#"{"Array1":[0,1,2,3,4,5,6],"Array2":[56,"He",true,"Hello",false,null],"Array3":["","He",true,"Hello",false,null],"Array4":[]}"#;

pub const JSTR_ARRAY_AFTER: &str = r#"{"Array1":[0,1,2,3,4,5,6],"Array2":[57,56,156,"new",false,"Bye",true,null],"Array3":[],"Array4":[1]}"#;

pub const JSTR_OBJECT_TREE: &str = r#"{ "Obj1":{ "Obj1_1":11, "Obj1_2":12 },"Obj2":2 }"#;
