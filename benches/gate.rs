//! Gate throughput benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;

use stagegate::application::ContractGate;
use stagegate::domain::models::SequenceGraph;
use stagegate::services::{SchemaRegistry, SharedRegistry};

fn bench_gate_validation(c: &mut Criterion) {
    let gate = ContractGate::new(
        SharedRegistry::new(SchemaRegistry::with_builtins()),
        SequenceGraph::canonical(),
    );

    let valid = json!({
        "contract_version": "1.0.0",
        "story_id": "STORY-GH-42",
        "source_agent": "github",
        "target_agent": "project_manager",
        "description": "Add a quiz module for fire safety training",
        "priority_level": "high",
        "time_constraint_minutes": 30,
        "quality_gates": ["dna_check", "schema_check"],
        "handoff_criteria": ["all gates green"]
    });

    let broken = json!({
        "contract_version": "1.0.0",
        "target_agent": "project_manager",
        "dna_compliance": "not an object",
        "time_constraint_minutes": "thirty"
    });

    c.bench_function("gate_validate_passing_contract", |b| {
        b.iter(|| gate.validate(black_box(&valid)).unwrap())
    });

    c.bench_function("gate_validate_blocked_contract", |b| {
        b.iter(|| gate.validate(black_box(&broken)).unwrap())
    });
}

criterion_group!(benches, bench_gate_validation);
criterion_main!(benches);
