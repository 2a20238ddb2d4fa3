use textdots::{pixelate, Error, Pixelator, RenderRequest};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn pixelate_all_keeps_input_order() {
    let requests: Vec<RenderRequest> = ["joe thel", "A", "42", "dots!", "xyz", "Hi"]
        .iter()
        .zip([2u32, 3, 10, 20, 3, 2])
        .map(|(text, resolution)| RenderRequest::new(*text, 150).with_resolution(resolution))
        .collect();

    let pixelator = Pixelator::new().with_concurrency(2);
    let results = pixelator.pixelate_all(requests.clone()).await;

    assert_eq!(results.len(), requests.len());
    for (req, res) in requests.iter().zip(results) {
        let expected = pixelate(req).expect("sync pixelate");
        assert_eq!(res.expect("async pixelate"), expected);
    }
}

#[tokio::test]
async fn failures_stay_in_their_slot() {
    let requests = vec![
        RenderRequest::new("A", 150),
        RenderRequest::new("   ", 150),
        RenderRequest::new("B", 150),
    ];
    let results = Pixelator::default().pixelate_all(requests).await;
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(Error::MeasurementError(_))));
    assert!(results[2].is_ok());
}

#[tokio::test]
async fn many_concurrent_requests_do_not_interfere() {
    let pixelator = Pixelator::new();
    let req = RenderRequest::new("joe thel", 300).with_resolution(10);
    let expected = pixelate(&req).unwrap();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let p = pixelator.clone();
            let r = req.clone();
            tokio::spawn(async move { p.pixelate(r).await })
        })
        .collect();
    for h in handles {
        assert_eq!(h.await.unwrap().unwrap(), expected);
    }
}
