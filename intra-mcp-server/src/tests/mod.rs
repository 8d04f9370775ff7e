mod rest_tests;

const SEPARATOR: &str = "================";

pub(crate) fn bundle(files: &[(&str, &str)]) -> String {
    let mut out = String::from("Directory Structure\n\nRepository Files\n\n");
    for (path, content) in files {
        out.push_str(&format!("{SEPARATOR}\nFile: {path}\n{SEPARATOR}\n{content}\n\n"));
    }
    out
}

pub(crate) fn go_bundle() -> String {
    bundle(&[(
        "go.mod",
        "module example.com/app\n\ngo 1.21\n\nrequire github.com/gin-gonic/gin v1.9.1\n",
    )])
}
