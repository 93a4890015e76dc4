// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use gcode2krl::ast::{Command, Letter};
use gcode2krl::parse::{self, ParseErrorKind};

#[test]
fn test_parse() {
    let src = r#"; generated by PrusaSlicer
M107
G21 ; set units to millimeters
G90
G1 Z.2 F7800
G1 X10 Y5.5 E.5 ; perimeter
g1 x1
G01 X-1 Y2
G2 X5 Y5 I2.5 J0 E1.2
G3 X0 Y0 I-2.5 J-2.5
G1 X1 X2 Y3

  G1 X5
"#;

    let parsed = r#"M107
G21
G90
G1 Z0.2
G1 X10 Y5.5 E
G1 X-1 Y2
G2 X5 Y5 I2.5 J0 E
G3 X0 Y0 I-2.5 J-2.5
G1 X1 Y3
"#;

    let prog = parse::parse("testfile", src).unwrap();

    // make sure we count lines correctly
    assert_eq!(prog.lines[0].lineno, 2);
    assert_eq!(prog.lines[5].lineno, 8);

    println!("{:#?}", prog);
    assert_eq!(prog.to_string(), parsed);
}

#[test]
fn test_classify() {
    for &(line, cmd) in &[
        ("G0 X1 Y1", Command::Move),
        ("G00 X1 Y1", Command::Move),
        ("G1 X1 Y1", Command::Move),
        ("G01 X1 Y1", Command::Move),
        ("G2 X1 Y1 I1 J1", Command::ArcCw),
        ("G3 X1 Y1 I1 J1", Command::ArcCcw),
        ("G21", Command::Ignored),
        ("G21 X1 Y1 I1 J1", Command::Ignored),  // never an arc
        ("G28 X0 Y0", Command::Unrecognized),
        ("G10", Command::Unrecognized),
        ("G92 E0", Command::Unrecognized),
        ("M104 S200", Command::Unrecognized),
        ("G", Command::Unrecognized),
    ] {
        let parsed = parse::parse_line(1, line).unwrap().unwrap();
        assert_eq!(parsed.command, cmd, "{}", line);
    }
    assert_eq!(parse::classify("G21"), Command::Ignored);
    assert_eq!(parse::normalize_token("G01"), "G1");
    assert_eq!(parse::normalize_token("G00"), "G0");
    assert_eq!(parse::normalize_token("M107"), "M107");
}

#[test]
fn test_words() {
    let line = parse::parse_line(7, "G1X10.5 Y-3 Z2 E-2.0 F2400").unwrap().unwrap();
    assert_eq!(line.lineno, 7);
    assert_eq!(line.command, Command::Move);
    assert_eq!(line.x, Some(10.5));
    assert_eq!(line.y, Some(-3.0));
    assert_eq!(line.z, Some(2.0));
    assert_eq!((line.i, line.j), (None, None));
    assert!(line.extruding);

    // the E value is never interpreted
    let line = parse::parse_line(1, "G1 X1 Y1 Ewhatever").unwrap().unwrap();
    assert!(line.extruding);
    assert!(line.has(Letter::E));

    // parameter letters are uppercase only
    let line = parse::parse_line(1, "G1 X1 Y1 z2 e").unwrap().unwrap();
    assert_eq!(line.z, None);
    assert!(!line.extruding);

    let line = parse::parse_line(1, "M117 homing x-axis, i.e. fast").unwrap().unwrap();
    assert_eq!(line.command, Command::Unrecognized);
    assert_eq!((line.x, line.i), (None, None));
    assert!(!line.extruding);

    let line = parse::parse_line(1, "G1 X1 Y1").unwrap().unwrap();
    assert!(!line.extruding);
    assert_eq!(line.missing(&[Letter::I, Letter::Y, Letter::J]), vec![Letter::I, Letter::J]);
}

#[test]
fn test_discarded() {
    for snippet in &[
        "",
        "; comment",
        "T0",
        " G1 X1 Y1",
        "g1 x1 y1",
        "EXCLUDE_OBJECT_DEFINE NAME=part",
    ] {
        assert_eq!(parse::parse_line(1, snippet).unwrap(), None, "{:?}", snippet);
    }
}

#[test]
fn test_invalid() {
    for &(snippet, letter, value) in &[
        ("G1 X1.2.3 Y0", Letter::X, "1.2.3"),
        ("G1 X0 Yabc", Letter::Y, "abc"),
        ("G1 Z", Letter::Z, ""),
        ("G1 X 10", Letter::X, ""),
        ("G2 X1 Y1 Iinf J0", Letter::I, "inf"),
        ("G3 X1 Y1 I0 J1,5", Letter::J, "1,5"),
    ] {
        let err = parse::parse_line(42, snippet).unwrap_err();
        assert_eq!(err.lineno, 42);
        assert_eq!(err.kind, ParseErrorKind::MalformedNumber {
            letter,
            value: value.into(),
        }, "{}", snippet);
    }

    let err = parse::parse("testfile", "G1 X0 Y0\n\nG1 X1 Y-\n").unwrap_err();
    assert_eq!(err.lineno, 3);
    assert_eq!(err.to_string(), "line 3: malformed number \"-\" after Y");
}
