//! Common grammar fixtures for tests.

#![allow(dead_code)]

/// A small but complete grammar exercising every production shape.
pub const SARIF_LIKE: &str = r#"
/* Static analysis results */
grammar SarifLog @namespace{Example.Sarif};

@rootObject
@summary{ The top level log object. }
sarifLog: version runs @minItems{0};

runs: run*;

@summary{ One invocation of an analysis tool. }
run: tool results? taxonomies*;

tool: STRING @name{Name};

results: result (',' result)*;

result: ruleId level message location*;

ruleId: STRING;
message: '"' STRING '"';

level @serializedValues{none, note, warning, error}: 'none' | 'note' | 'warning' | 'error';

version: '2.1.0';

location: physicalLocation | logicalLocation;
physicalLocation: URI region?;
logicalLocation: STRING @name{FullyQualifiedName} NUMBER? @name{Index} @minimum{-1};
region: NUMBER @name{StartLine} ':' NUMBER @name{StartColumn};

taxonomies: taxon+;
taxon: STRING @name{Guid} @pattern{^[0-9a-f-]+$} STRING @name{Name};

// Lexical helpers are ignored by the model
fragment digit: '0'..'9';
"#;

/// Grammar whose wrapper types form a 2-cycle.
pub const TWO_CYCLE: &str = "grammar Cycle; a: b; b: a;";

/// Base type with three alternatives, declared out of order.
pub const BASE_TYPE: &str = r#"
grammar Shapes;
shape: square | circle | triangle;
circle: NUMBER @name{Radius};
square: NUMBER @name{Side};
triangle: NUMBER @name{A} NUMBER @name{B} NUMBER @name{C};
"#;

/// Grammar with `@generateLocations` on the declaration.
pub const LOCATIONS: &str = r#"
grammar Located @generateLocations;
node: STRING @name{Text} NUMBER @name{Offset};
kind: 'a' | 'b';
"#;
