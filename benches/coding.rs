use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tree_coding::{
    from_tree, to_tree, to_tree_value, Decodable, Decoder, Encodable, Encoder, Result,
};

#[derive(Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

impl Encodable for User {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        let mut container = encoder.container();
        container.encode("id", &self.id)?;
        container.encode("name", &self.name)?;
        container.encode("email", &self.email)?;
        container.encode("active", &self.active)
    }
}

impl Decodable for User {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
        let mut container = decoder.container()?;
        Ok(User {
            id: container.decode("id")?,
            name: container.decode("name")?,
            email: container.decode("email")?,
            active: container.decode("active")?,
        })
    }
}

#[derive(Clone)]
struct Metadata {
    created: String,
    version: u32,
}

impl Encodable for Metadata {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        let mut container = encoder.container();
        container.encode("created", &self.created)?;
        container.encode("version", &self.version)
    }
}

impl Decodable for Metadata {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
        let mut container = decoder.container()?;
        Ok(Metadata {
            created: container.decode("created")?,
            version: container.decode("version")?,
        })
    }
}

#[derive(Clone)]
struct NestedData {
    id: u32,
    metadata: Metadata,
    tags: Vec<String>,
    owners: Vec<User>,
}

impl Encodable for NestedData {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        let mut container = encoder.container();
        container.encode("id", &self.id)?;
        container.encode("metadata", &self.metadata)?;
        container.encode("tags", &self.tags)?;
        container.encode("owners", &self.owners)
    }
}

impl Decodable for NestedData {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
        let mut container = decoder.container()?;
        Ok(NestedData {
            id: container.decode("id")?,
            metadata: container.decode("metadata")?,
            tags: container.decode("tags")?,
            owners: container.decode("owners")?,
        })
    }
}

fn sample_user(id: u32) -> User {
    User {
        id,
        name: format!("User {}", id),
        email: format!("user{}@example.com", id),
        active: id % 2 == 0,
    }
}

fn sample_nested() -> NestedData {
    NestedData {
        id: 1,
        metadata: Metadata {
            created: "2024-01-01T00:00:00Z".to_string(),
            version: 3,
        },
        tags: vec!["alpha".to_string(), "beta".to_string()],
        owners: (0..5).map(sample_user).collect(),
    }
}

fn benchmark_encode_simple(c: &mut Criterion) {
    let user = sample_user(123);
    c.bench_function("encode_simple_struct", |b| {
        b.iter(|| to_tree(black_box(&user)))
    });
}

fn benchmark_decode_simple(c: &mut Criterion) {
    let tree = to_tree_value(&sample_user(123)).unwrap();
    c.bench_function("decode_simple_struct", |b| {
        b.iter(|| from_tree::<User>(black_box(&tree)))
    });
}

fn benchmark_nested(c: &mut Criterion) {
    let data = sample_nested();
    let tree = to_tree_value(&data).unwrap();

    c.bench_function("encode_nested_struct", |b| {
        b.iter(|| to_tree(black_box(&data)))
    });
    c.bench_function("decode_nested_struct", |b| {
        b.iter(|| from_tree::<NestedData>(black_box(&tree)))
    });
}

fn benchmark_sequences(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequence_of_users");
    for size in [10, 100, 1000].iter() {
        let users: Vec<User> = (0..*size).map(sample_user).collect();
        let tree = to_tree_value(&users).unwrap();

        group.bench_with_input(BenchmarkId::new("encode", size), &users, |b, users| {
            b.iter(|| to_tree_value(black_box(users)))
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &tree, |b, tree| {
            b.iter(|| from_tree::<Vec<User>>(black_box(tree)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_encode_simple,
    benchmark_decode_simple,
    benchmark_nested,
    benchmark_sequences
);
criterion_main!(benches);
