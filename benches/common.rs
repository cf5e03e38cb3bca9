/// Synthetic scene: a white rectangle on a black background, RGB
pub fn page_scene(width: usize, height: usize) -> Vec<u8> {
    let (x0, x1) = (width / 5, width * 4 / 5);
    let (y0, y1) = (height / 4, height * 3 / 4);
    let mut data = vec![0u8; width * height * 3];
    for y in y0..y1 {
        for x in x0..x1 {
            let i = (y * width + x) * 3;
            data[i..i + 3].copy_from_slice(&[255, 255, 255]);
        }
    }
    data
}
