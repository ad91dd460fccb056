use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use owlrdf::owl::{Axiom, Class, ClassExpression, Entity, ObjectProperty, ObjectPropertyExpression};
use owlrdf::{FunctionalRenderer, Ontology, OntologyParser, RdfWriter, Triple};

fn ex(name: String) -> String {
    format!("http://example.org/bench#{}", name)
}

/// A class hierarchy with one existential restriction per class
fn synthetic_ontology(size: usize) -> Ontology {
    let mut ont = Ontology::with_iri("http://example.org/bench");
    let eats = ObjectProperty::new(ex("eats".to_string()));
    ont.add_axiom(Axiom::Declaration(Entity::ObjectProperty(eats.clone())));
    ont.add_axiom(Axiom::TransitiveObjectProperty(
        ObjectPropertyExpression::named(ex("eats".to_string())),
    ));

    for i in 0..size {
        let name = ex(format!("C{}", i));
        ont.add_axiom(Axiom::Declaration(Entity::Class(Class::new(name.clone()))));
        if i > 0 {
            ont.add_axiom(Axiom::SubClassOf {
                sub: ClassExpression::class(name.clone()),
                sup: ClassExpression::class(ex(format!("C{}", i / 2))),
            });
            ont.add_axiom(Axiom::SubClassOf {
                sub: ClassExpression::class(name),
                sup: ClassExpression::ObjectSomeValuesFrom {
                    property: ObjectPropertyExpression::named(ex("eats".to_string())),
                    filler: Box::new(ClassExpression::class(ex(format!("C{}", i - 1)))),
                },
            });
        }
    }
    ont
}

fn synthetic_triples(size: usize) -> Vec<Triple> {
    let mut triples = RdfWriter::write(&synthetic_ontology(size)).unwrap();
    // Declarations last, so most triples go through the deferred passes
    triples.reverse();
    triples
}

/// Benchmark triple-to-axiom translation
fn bench_parse_triples(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_triples");
    let parser = OntologyParser::default();

    for size in [100, 1000, 5000].iter() {
        let triples = synthetic_triples(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &triples, |b, triples| {
            b.iter(|| {
                let outcome = parser.parse_triples(triples.clone());
                criterion::black_box(outcome.ontology.axiom_count());
            });
        });
    }
    group.finish();
}

/// Benchmark functional-syntax rendering
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_functional");
    let renderer = FunctionalRenderer::default();

    for size in [100, 1000, 5000].iter() {
        let ontology = synthetic_ontology(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &ontology, |b, ontology| {
            b.iter(|| {
                let text = renderer.render(ontology).unwrap();
                criterion::black_box(text.len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse_triples, bench_render);
criterion_main!(benches);
