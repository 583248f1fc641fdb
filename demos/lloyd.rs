use grid_kmeans::*;

fn main() {
    env_logger::init();
    let (height, width, k, max_iter) = (20, 20, 3, 100);

    // Generate some random data
    let rows: Vec<Vec<u8>> = (0..height)
        .map(|_| (0..width).map(|_| rand::random()).collect())
        .collect();

    // Calculate kmeans, drawing the initial centroids from the grid's value range
    let mut engine: ClusterEngine<u8, f32> = ClusterEngine::new(rows, k, height, width).unwrap();
    let centroids = engine.kmeans_lloyd(max_iter, ClusterEngine::init_random_range, &ClusterConfig::default()).unwrap();

    println!("Centroids: {:?}", centroids);
    println!("Cluster sizes: {:?}", engine.state().centroid_frequency());
    println!("Error: {}", engine.state().distsum);
}
