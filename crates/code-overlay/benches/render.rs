use code_overlay::{
    AnnotationBundle, ErrorAnnotation, Line, MonochromeHighlighter, QuickInfo, RenderOptions,
    Token, render_annotated, render_plain,
};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn large_block(line_count: usize) -> (Vec<Line>, AnnotationBundle) {
    let mut lines = Vec::with_capacity(line_count);
    let mut annotations = AnnotationBundle::new();
    let mut offset = 0usize;

    for i in 0..line_count {
        let name = format!("value{i:05}");
        let line = vec![
            Token::new("const ", "#569CD6"),
            Token::new(name.clone(), "#9CDCFE"),
            Token::new(" = ", "#D4D4D4"),
            Token::new(format!("{i}"), "#B5CEA8"),
        ];
        let name_start = offset + "const ".len();

        annotations.push(QuickInfo {
            line: i,
            character: 6,
            start: name_start,
            length: name.len(),
            kind: "lsp".to_string(),
            text: format!("const {name}: {i}"),
            docs: None,
        });
        if i % 10 == 0 {
            annotations.push(ErrorAnnotation {
                line: i,
                character: 6,
                start: name_start,
                length: 5,
                code: "6133".to_string(),
                rendered_message: format!("'{name}' is declared but its value is never read."),
            });
        }

        offset += line.iter().map(Token::char_len).sum::<usize>() + 1;
        lines.push(line);
    }

    (lines, annotations)
}

fn bench_render_annotated(c: &mut Criterion) {
    let (lines, annotations) = large_block(2_000);
    let options = RenderOptions::new().with_lang_id("ts");
    let highlighter = MonochromeHighlighter::default();

    c.bench_function("render_annotated/2k_lines", |b| {
        b.iter(|| {
            let html = render_annotated(
                black_box(&lines),
                &options,
                black_box(&annotations),
                &highlighter,
            );
            black_box(html.len());
        })
    });
}

fn bench_render_plain(c: &mut Criterion) {
    let (lines, _) = large_block(2_000);
    let options = RenderOptions::new().with_lang_id("ts");

    c.bench_function("render_plain/2k_lines", |b| {
        b.iter(|| black_box(render_plain(black_box(&lines), &options).len()))
    });
}

criterion_group!(benches, bench_render_annotated, bench_render_plain);
criterion_main!(benches);
