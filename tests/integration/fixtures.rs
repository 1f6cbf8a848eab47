//! Fact documents for a small corpus of Go files, as a semantic front end
//! would emit them. Line and column numbers refer to the sources quoted
//! above each builder (tabs count as one column).

#![allow(dead_code)]

use usecount::model::{DeclKind, InterfaceId, OccurrenceKind, OpaqueContext, Resolution};
use usecount::{Program, ProgramBuilder};

/// ```go
///  1 package pkg
///  2
///  3 import _ "fmt"
///  4
///  5 type t1 struct{}
///  6 type t2 struct{}
///  7 type t3 struct{}
///  8
///  9 var _ = t2{}
/// 10
/// 11 func fn1() {
/// 12 	_ = t1{}
/// 13 	var _ = t1{}
/// 14 }
/// 15
/// 16 func fn2() {
/// 17 	_ = t3{}
/// 18 }
/// 19
/// 20 func init() {
/// 21 	fn2()
/// 22 }
/// 23
/// 24 func _() {}
/// 25
/// 26 type _ struct{}
/// ```
pub fn blank() -> Program {
    let mut b = ProgramBuilder::new("blank.go");
    b.discard(3, 8);

    let t1 = b.declare(DeclKind::Type, "t1", 5, 6).header_to(5, 16).id;
    let t2 = b.declare(DeclKind::Type, "t2", 6, 6).header_to(6, 16).id;
    let t3 = b.declare(DeclKind::Type, "t3", 7, 6).header_to(7, 16).id;

    b.composite(9, 9, t2);

    b.declare(DeclKind::Function, "fn1", 11, 6).header_to(11, 10).body_to(14);
    b.composite(12, 6, t1);
    b.composite(13, 10, t1);

    let fn2 = b.declare(DeclKind::Function, "fn2", 16, 6).header_to(16, 10).body_to(18).id;
    b.composite(17, 6, t3);

    b.declare(DeclKind::Function, "init", 20, 6).header_to(20, 11).body_to(22);
    b.call(21, 2, fn2);

    b.build()
}

/// ```go
///  1 package main
///  2
///  3 type state func() state
///  4
///  5 func a() state {
///  6 	return a
///  7 }
///  8
///  9 func main() {
/// 10 	st := a
/// 11 	_ = st()
/// 12 }
/// 13
/// 14 type t1 struct{}
/// 15 type t2 struct{}
/// 16 type t3 struct{}
/// 17
/// 18 func fn1() t1     { return t1{} }
/// 19 func fn2() (x t2) { return }
/// 20
/// 21 func fn3() *t3 { return nil }
/// 22
/// 23 func fn4() {
/// 24 	const x = 1
/// 25 	const y = 2
/// 26 	type foo int
/// 27 	type bar int
/// 28
/// 29 	_ = x
/// 30 	var _ bar
/// 31 }
/// 32
/// 33 func init() {
/// 34 	fn2()
/// 35 	fn3()
/// 36 	fn4()
/// 37 }
/// ```
pub fn functions() -> Program {
    let mut b = ProgramBuilder::new("functions.go");

    let state = b.declare(DeclKind::Type, "state", 3, 6).header_to(3, 23).id;
    b.refer(3, 19, OccurrenceKind::Identifier, state);

    let a = b.declare(DeclKind::Function, "a", 5, 6).header_to(5, 14).body_to(7).id;
    b.refer(5, 10, OccurrenceKind::Identifier, state);
    b.refer(6, 9, OccurrenceKind::Identifier, a);

    b.declare(DeclKind::Function, "main", 9, 6).header_to(9, 11).body_to(12);
    let st = b.declare(DeclKind::Variable, "st", 10, 2).local().id;
    b.refer(10, 8, OccurrenceKind::Identifier, a);
    b.alias(st, a);
    b.call(11, 6, st);

    let t1 = b.declare(DeclKind::Type, "t1", 14, 6).header_to(14, 16).id;
    let t2 = b.declare(DeclKind::Type, "t2", 15, 6).header_to(15, 16).id;
    let t3 = b.declare(DeclKind::Type, "t3", 16, 6).header_to(16, 16).id;

    b.declare(DeclKind::Function, "fn1", 18, 6).header_to(18, 13).body_to(18);
    b.refer(18, 12, OccurrenceKind::Identifier, t1);
    b.composite(18, 28, t1);

    let fn2 = b.declare(DeclKind::Function, "fn2", 19, 6).header_to(19, 17).body_to(19).id;
    let x = b.declare(DeclKind::Variable, "x", 19, 13).local().id;
    b.refer(19, 15, OccurrenceKind::Identifier, t2);
    b.refer(19, 21, OccurrenceKind::ImplicitResult, x);

    let fn3 = b.declare(DeclKind::Function, "fn3", 21, 6).header_to(21, 14).body_to(21).id;
    b.refer(21, 13, OccurrenceKind::Identifier, t3);

    let fn4 = b.declare(DeclKind::Function, "fn4", 23, 6).header_to(23, 10).body_to(31).id;
    let cx = b.declare(DeclKind::Constant, "x", 24, 8).local().id;
    b.declare(DeclKind::Constant, "y", 25, 8).local();
    b.declare(DeclKind::Type, "foo", 26, 7).local().header_to(26, 13);
    let bar = b.declare(DeclKind::Type, "bar", 27, 7).local().header_to(27, 13).id;
    b.refer(29, 6, OccurrenceKind::Identifier, cx);
    b.refer(30, 8, OccurrenceKind::Identifier, bar);
    b.refer(30, 8, OccurrenceKind::ValueType, bar);

    b.declare(DeclKind::Function, "init", 33, 6).header_to(33, 11).body_to(37);
    b.call(34, 2, fn2);
    b.call(35, 2, fn3);
    b.call(36, 2, fn4);

    b.build()
}

/// ```go
///  1 package pkg
///  2
///  3 type t struct{}
///  4
///  5 func (t) fragment() {}
///  6
///  7 func fn() bool {
///  8 	var v interface{} = t{}
///  9 	switch obj := v.(type) {
/// 10 	// XXX it shouldn't report fragment(), because fn is used 0 times
/// 11 	case interface {
/// 12 		fragment()
/// 13 	}:
/// 14 		obj.fragment()
/// 15 	}
/// 16 	return false
/// 17 }
/// ```
///
/// The type-switch binding `obj` has one implicit object per clause and
/// no declaration of its own; its use is left unresolved.
pub fn nested() -> Program {
    let mut b = ProgramBuilder::new("nested.go");
    let literal = InterfaceId(1);

    let t = b.declare(DeclKind::Type, "t", 3, 6).header_to(3, 15).id;

    b.declare(DeclKind::Function, "fragment", 5, 10)
        .receiver(t)
        .header_to(5, 19)
        .body_to(5);
    b.refer(5, 7, OccurrenceKind::Identifier, t);

    b.declare(DeclKind::Function, "fn", 7, 6).header_to(7, 14).body_to(17);
    let v = b.declare(DeclKind::Variable, "v", 8, 6).local().id;
    b.composite(8, 22, t);
    b.opaque_flow(8, 22, t, OpaqueContext::Opaque);
    b.refer(9, 16, OccurrenceKind::Identifier, v);

    let fragment = b
        .declare(DeclKind::Function, "fragment", 12, 3)
        .interface(literal)
        .id;
    b.satisfies(literal, t);

    b.occurrence(14, 3, OccurrenceKind::Identifier, Resolution::Unresolved);
    b.occurrence(14, 7, OccurrenceKind::Selector, Resolution::Dispatch(fragment));

    b.build()
}

/// ```go
///  1 package main
///  2
///  3 type speaker interface { Speak() }
///  4 type dog struct{}
///  5 func (dog) Speak() {}
///  6
///  7 func main() {
///  8 	var s speaker = dog{}
///  9 	s.Speak()
/// 10 }
/// ```
pub fn dispatch() -> Program {
    let mut b = ProgramBuilder::new("dispatch.go");
    let iface = InterfaceId(1);

    let speaker = b.declare(DeclKind::Type, "speaker", 3, 6).header_to(3, 34).id;
    let speak = b
        .declare(DeclKind::Function, "Speak", 3, 26)
        .interface(iface)
        .exported()
        .id;
    let dog = b.declare(DeclKind::Type, "dog", 4, 6).header_to(4, 17).id;
    b.declare(DeclKind::Function, "Speak", 5, 12)
        .receiver(dog)
        .exported()
        .header_to(5, 18)
        .body_to(5);
    b.refer(5, 7, OccurrenceKind::Identifier, dog);
    b.satisfies(iface, dog);

    b.declare(DeclKind::Function, "main", 7, 6).header_to(7, 11).body_to(10);
    let s = b.declare(DeclKind::Variable, "s", 8, 6).local().id;
    b.refer(8, 8, OccurrenceKind::Identifier, speaker);
    b.refer(8, 8, OccurrenceKind::ValueType, speaker);
    b.composite(8, 18, dog);
    b.refer(9, 2, OccurrenceKind::Identifier, s);
    b.occurrence(9, 4, OccurrenceKind::Selector, Resolution::Dispatch(speak));

    b.build()
}

/// A library package with an exported surface and a reflectively
/// serialized type.
///
/// ```go
///  1 package lib
///  2
///  3 type Config struct {
///  4 	Name string
///  5 	size int
///  6 }
///  7
///  8 func Load() Config {
///  9 	var c Config
/// 10 	json.Unmarshal(data, &c)
/// 11 	return c
/// 12 }
/// 13
/// 14 func helper() {}
/// ```
pub fn library() -> Program {
    let mut b = ProgramBuilder::new("lib.go");

    let config = b
        .declare(DeclKind::Type, "Config", 3, 6)
        .exported()
        .header_to(3, 20)
        .body_to(6)
        .id;
    b.declare(DeclKind::Field, "Name", 4, 2).owned_by(config).exported();
    b.declare(DeclKind::Field, "size", 5, 2).owned_by(config);

    b.declare(DeclKind::Function, "Load", 8, 6)
        .exported()
        .header_to(8, 18)
        .body_to(12);
    b.refer(8, 13, OccurrenceKind::Identifier, config);
    let c = b.declare(DeclKind::Variable, "c", 9, 6).local().id;
    b.refer(9, 8, OccurrenceKind::Identifier, config);
    b.refer(9, 8, OccurrenceKind::ValueType, config);
    b.refer(10, 24, OccurrenceKind::Identifier, c);
    b.opaque_flow(10, 23, config, OpaqueContext::Routine("encoding/json.Unmarshal".into()));
    b.refer(11, 9, OccurrenceKind::Identifier, c);

    b.declare(DeclKind::Function, "helper", 14, 6).header_to(14, 13).body_to(14);

    b.build()
}

/// Struct members reached through selectors, an embedded field and a
/// type-switch case.
///
/// ```go
///  1 package main
///  2
///  3 type base struct {
///  4 	id int
///  5 }
///  6
///  7 func (base) Describe() string { return "" }
///  8
///  9 type item struct {
/// 10 	base
/// 11 	label string
/// 12 }
/// 13
/// 14 type shape interface{}
/// 15 type circle struct{}
/// 16 type square struct{}
/// 17
/// 18 func kind(s shape) string {
/// 19 	switch s.(type) {
/// 20 	case circle:
/// 21 		return "circle"
/// 22 	}
/// 23 	return ""
/// 24 }
/// 25
/// 26 func main() {
/// 27 	it := item{}
/// 28 	println(it.label, it.id)
/// 29 	it.Describe()
/// 30 	kind(circle{})
/// 31 }
/// 32
/// 33 func stale(it item) string {
/// 34 	return it.label
/// 35 }
/// ```
///
/// `it.id` and `it.Describe` are promoted through the embedded `base`
/// field, so each also uses that field.
pub fn members() -> Program {
    let mut b = ProgramBuilder::new("members.go");

    let base = b.declare(DeclKind::Type, "base", 3, 6).header_to(3, 18).body_to(5).id;
    let id = b.declare(DeclKind::Field, "id", 4, 2).owned_by(base).id;
    let describe = b
        .declare(DeclKind::Function, "Describe", 7, 13)
        .receiver(base)
        .exported()
        .header_to(7, 31)
        .body_to(7)
        .id;
    b.refer(7, 7, OccurrenceKind::Identifier, base);

    let item = b.declare(DeclKind::Type, "item", 9, 6).header_to(9, 18).body_to(12).id;
    let embedded = b
        .declare(DeclKind::Field, "base", 10, 2)
        .owned_by(item)
        .of_type(base)
        .id;
    b.refer(10, 2, OccurrenceKind::Identifier, base);
    let label = b.declare(DeclKind::Field, "label", 11, 2).owned_by(item).id;

    let shape = b.declare(DeclKind::Type, "shape", 14, 6).header_to(14, 22).id;
    let circle = b.declare(DeclKind::Type, "circle", 15, 6).header_to(15, 20).id;
    b.declare(DeclKind::Type, "square", 16, 6).header_to(16, 20);

    let kind = b.declare(DeclKind::Function, "kind", 18, 6).header_to(18, 27).body_to(24).id;
    let s = b.declare(DeclKind::Variable, "s", 18, 11).local().id;
    b.refer(18, 13, OccurrenceKind::Identifier, shape);
    b.refer(19, 9, OccurrenceKind::Identifier, s);
    b.refer(20, 7, OccurrenceKind::TypeSwitchCase, circle);

    b.declare(DeclKind::Function, "main", 26, 6).header_to(26, 13).body_to(31);
    let it = b.declare(DeclKind::Variable, "it", 27, 2).local().id;
    b.composite(27, 8, item);
    b.refer(28, 10, OccurrenceKind::Identifier, it);
    b.refer(28, 13, OccurrenceKind::Selector, label);
    b.refer(28, 20, OccurrenceKind::Identifier, it);
    b.refer(28, 23, OccurrenceKind::Selector, id);
    b.refer(28, 23, OccurrenceKind::EmbeddedField, embedded);
    b.refer(29, 2, OccurrenceKind::Identifier, it);
    b.refer(29, 5, OccurrenceKind::Selector, describe);
    b.refer(29, 5, OccurrenceKind::EmbeddedField, embedded);
    b.call(30, 2, kind);
    b.composite(30, 7, circle);

    b.declare(DeclKind::Function, "stale", 33, 6).header_to(33, 28).body_to(35);
    let param = b.declare(DeclKind::Variable, "it", 33, 12).local().id;
    b.refer(33, 15, OccurrenceKind::Identifier, item);
    b.refer(34, 9, OccurrenceKind::Identifier, param);
    b.refer(34, 12, OccurrenceKind::Selector, label);

    b.build()
}
