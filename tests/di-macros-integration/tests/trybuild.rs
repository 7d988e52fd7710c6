//! trybuild 编译期测试

#[test]
fn trybuild_injectable() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/injectable_ok.rs");
}
