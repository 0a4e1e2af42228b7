use std::time::Duration;

use chatvec_core::traits::VectorIndex;
use chatvec_core::types::{Dimension, IndexTable, IndexTarget, Pair, VectorRecord};
use chatvec_core::Error;
use chatvec_vector::memory::cosine;
use chatvec_vector::{MemoryIndex, PineconeClient};

fn unit(dim: usize, hot: usize) -> Vec<f32> {
    let mut v = vec![0.0; dim];
    v[hot] = 1.0;
    v
}

fn record(i: usize, dim: Dimension, values: Vec<f32>) -> VectorRecord {
    VectorRecord::from_pair(i, &Pair::new(format!("in {i}"), format!("out {i}")), dim, values, 0)
}

#[tokio::test]
async fn upsert_then_query_returns_the_record() -> anyhow::Result<()> {
    let index = MemoryIndex::new();
    let records = vec![record(0, Dimension::D384, unit(384, 0)), record(1, Dimension::D384, unit(384, 1))];
    assert_eq!(index.upsert(Dimension::D384, &records).await?, 2);

    let hits = index.query(Dimension::D384, &unit(384, 1), 3).await?;
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, "pair_1_dim_384");
    assert!((hits[0].score - 1.0).abs() < 1e-6);
    assert_eq!(hits[0].metadata.input, "in 1");
    assert_eq!(hits[0].metadata.dimension(), Some(384));
    Ok(())
}

#[tokio::test]
async fn upsert_overwrites_by_id() -> anyhow::Result<()> {
    let index = MemoryIndex::new();
    index.upsert(Dimension::D512, &[record(0, Dimension::D512, unit(512, 0))]).await?;
    index.upsert(Dimension::D512, &[record(0, Dimension::D512, unit(512, 7))]).await?;
    assert_eq!(index.len(Dimension::D512), 1);
    let stored = index.get(Dimension::D512, "pair_0_dim_512").expect("stored");
    assert_eq!(stored.values[7], 1.0);
    Ok(())
}

#[tokio::test]
async fn partitions_are_separate_per_dimension() -> anyhow::Result<()> {
    let index = MemoryIndex::new();
    index.upsert(Dimension::D384, &[record(0, Dimension::D384, unit(384, 0))]).await?;
    assert!(index.query(Dimension::D1024, &unit(1024, 0), 3).await?.is_empty());
    assert_eq!(index.len(Dimension::D384), 1);
    assert!(!index.is_empty());
    Ok(())
}

#[tokio::test]
async fn zero_vector_query_lists_everything_up_to_top_k() -> anyhow::Result<()> {
    let index = MemoryIndex::new();
    let records: Vec<_> = (0..5).map(|i| record(i, Dimension::D384, unit(384, i))).collect();
    index.upsert(Dimension::D384, &records).await?;
    let hits = index.query(Dimension::D384, &vec![0.0; 384], 3).await?;
    assert_eq!(hits.len(), 3);
    assert!(hits.iter().all(|h| h.score == 0.0));
    Ok(())
}

#[test]
fn cosine_handles_zero_vectors() {
    assert_eq!(cosine(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    assert!((cosine(&[1.0, 1.0], &[2.0, 2.0]) - 1.0).abs() < 1e-6);
}

#[tokio::test]
async fn pinecone_client_rejects_unconfigured_dimension_before_any_request() -> anyhow::Result<()> {
    // Unroutable host: if a request were attempted the error would be Request, not NoIndex.
    let mut target = IndexTarget::new("only-384", "nowhere", "ns");
    target.host = Some("http://127.0.0.1:9".to_string());
    let table = IndexTable::new([(Dimension::D384, target)])?;
    let client = PineconeClient::new(table, "key", Duration::from_secs(1))?;

    let err = client.query(Dimension::D512, &[0.0; 512], 3).await.unwrap_err();
    assert!(matches!(err, Error::NoIndex(512)));

    let err = client.upsert(Dimension::D1024, &[record(0, Dimension::D1024, unit(1024, 0))]).await.unwrap_err();
    assert!(matches!(err, Error::NoIndex(1024)));

    assert_eq!(client.upsert(Dimension::D1024, &[]).await?, 0);
    Ok(())
}
