//! SDK-style `.csproj` projects.

use super::normalize_version;
use crate::analyzer::parsers::parse_xml;
use crate::analyzer::AnalysisAccumulator;

const WEB_SDK: &str = "Microsoft.NET.Sdk.Web";

pub fn analyze_csproj(content: &str, acc: &mut AnalysisAccumulator) {
    acc.add_project_type(".NET");

    let Some(project) = parse_xml(content) else {
        acc.set_language_version(".NET", None);
        return;
    };

    if project.attr("Sdk") == Some(WEB_SDK) {
        acc.add_project_type("ASP.NET Core");
    }

    let target = project
        .descendants("TargetFramework")
        .into_iter()
        .map(|e| e.text.trim().to_string())
        .find(|t| !t.is_empty())
        .or_else(|| {
            project
                .descendants("TargetFrameworks")
                .into_iter()
                .find_map(|e| e.text.split(';').next().map(|t| t.trim().to_string()))
        });
    let version = target.as_deref().and_then(normalize_version);
    acc.set_language_version(".NET", version.as_deref());

    for reference in project.descendants("PackageReference") {
        let Some(name) = reference.attr("Include") else {
            continue;
        };
        let version = reference
            .attr("Version")
            .or_else(|| reference.child_text("Version"));
        acc.add_dependency(name, version, "@");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_project() {
        let mut acc = AnalysisAccumulator::new();
        analyze_csproj(
            r#"<Project Sdk="Microsoft.NET.Sdk.Web">
  <PropertyGroup>
    <TargetFramework>net8.0</TargetFramework>
  </PropertyGroup>
  <ItemGroup>
    <PackageReference Include="Serilog" Version="3.1.1" />
    <PackageReference Include="Dapper">
      <Version>2.1.24</Version>
    </PackageReference>
    <PackageReference Include="Polly" />
  </ItemGroup>
</Project>"#,
            &mut acc,
        );

        assert!(acc.has_project_type("ASP.NET Core"));
        assert_eq!(acc.language_version.as_deref(), Some(".NET 8.0"));
        let deps: Vec<_> = acc.dependencies.iter().map(String::as_str).collect();
        assert_eq!(deps, vec!["Dapper@2.1.24", "Polly", "Serilog@3.1.1"]);
    }

    #[test]
    fn test_multi_target() {
        let mut acc = AnalysisAccumulator::new();
        analyze_csproj(
            "<Project Sdk=\"Microsoft.NET.Sdk\"><PropertyGroup><TargetFrameworks>net6.0;net7.0</TargetFrameworks></PropertyGroup></Project>",
            &mut acc,
        );
        assert!(!acc.has_project_type("ASP.NET Core"));
        assert_eq!(acc.language_version.as_deref(), Some(".NET 6.0"));
    }
}
