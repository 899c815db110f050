//! Rendering performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use codetempl::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HEADER: &str = r#"/*
 * $filename$ - $project$
 * Created $date{"fmt": "%Y-%m-%d"}$
 */
#ifndef $guard$
#define $guard$

$$if($with_namespace$ and not $legacy$)
namespace $project$ {
$$else
/* no namespace */
$$endif

$$foreach($members$)
int $members$;
$$endfor

#endif
"#;

fn config() -> TemplateConfig {
    let mut variables = UserVariables::from_pairs(["project:bench"]).unwrap();
    variables
        .overlay_json_str(
            r#"{"with_namespace": true, "legacy": false, "members": ["alpha", "beta", "gamma", "delta"]}"#,
        )
        .unwrap();
    TemplateConfig::new(EscapeChar::default(), variables)
}

fn bench_simple_render(c: &mut Criterion) {
    let config = config();
    let renderer = Renderer::new(&config).unwrap();

    c.bench_function("simple_render", |b| {
        b.iter(|| {
            renderer
                .render(black_box("// $project$: $filename$\n"), Path::new("main.c"))
                .unwrap()
        })
    });
}

fn bench_header_render(c: &mut Criterion) {
    let config = config();
    let renderer = Renderer::new(&config).unwrap();

    c.bench_function("header_render", |b| {
        b.iter(|| renderer.render(black_box(HEADER), Path::new("src/widget.h")).unwrap())
    });
}

fn bench_large_template(c: &mut Criterion) {
    let config = config();
    let renderer = Renderer::new(&config).unwrap();
    let large = HEADER.repeat(50);

    c.bench_function("large_template_render", |b| {
        b.iter(|| renderer.render(black_box(&large), Path::new("big.h")).unwrap())
    });
}

fn bench_extract(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let template = temp_dir.path().join("header.templ");
    fs::write(&template, HEADER.repeat(20)).unwrap();

    c.bench_function("extract_variables", |b| {
        b.iter(|| extract_variables(black_box(&[&template]), EscapeChar::default()).unwrap())
    });
}

criterion_group!(
    benches,
    bench_simple_render,
    bench_header_render,
    bench_large_template,
    bench_extract
);
criterion_main!(benches);
