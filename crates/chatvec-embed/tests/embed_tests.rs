use chatvec_core::traits::Embedder;
use chatvec_core::types::{Dimension, TaskType};
use chatvec_embed::FakeEmbedder;

#[tokio::test]
async fn fake_embedder_shapes_and_determinism() -> anyhow::Result<()> {
    let embedder = FakeEmbedder::new();

    for dim in Dimension::ALL {
        let v1 = embedder.embed("Book transport for tomorrow at 8 AM", dim, TaskType::RetrievalDocument).await?;
        let v2 = embedder.embed("Book transport for tomorrow at 8 AM", dim, TaskType::RetrievalQuery).await?;

        assert_eq!(v1.len(), dim.size(), "embedding has the requested length");

        // Norm approximately 1.0
        let norm: f32 = v1.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");

        // Deterministic for same input, whatever the task
        for (a, b) in v1.iter().zip(v2.iter()) { assert!((a - b).abs() <= 1e-6); }
    }
    Ok(())
}

#[tokio::test]
async fn different_texts_give_different_vectors() -> anyhow::Result<()> {
    let embedder = FakeEmbedder::new();
    let a = embedder.embed("Cancel my transport for tomorrow", Dimension::D512, TaskType::RetrievalDocument).await?;
    let b = embedder.embed("Where is my cab?", Dimension::D512, TaskType::RetrievalDocument).await?;
    let dot: f32 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
    assert!(dot < 0.99, "unrelated texts should not be identical (dot={dot})");
    Ok(())
}

#[tokio::test]
async fn empty_text_is_the_zero_vector() -> anyhow::Result<()> {
    let v = FakeEmbedder::new().embed("", Dimension::D384, TaskType::RetrievalQuery).await?;
    assert_eq!(v.len(), 384);
    assert!(v.iter().all(|x| *x == 0.0));
    Ok(())
}
